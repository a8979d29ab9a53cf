use std::net::TcpListener;

use actix_web::{web, App, HttpServer};
use actix_web::dev::Server;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::routes::health::health_check;
use crate::routes::waitlist::join_waitlist;

/// Wires the HTTP application: the connection pool is handed to every worker
/// as shared `web::Data` rather than reached for through a module-level
/// singleton, so handlers stay testable against any pool.
pub fn run(listener: TcpListener, db_connection: PgPool) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(db_connection);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/api/email", web::post().to(join_waitlist))
            .app_data(connection.clone())
    })
    .listen(listener)?
    .run())
}

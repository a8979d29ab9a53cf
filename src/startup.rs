use std::net::TcpListener;

use actix_web::dev::Server;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{Configuration, DatabaseSettings};
use crate::run::run;

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    pub async fn build(configuration: Configuration) -> Result<Self, anyhow::Error> {
        let db_connection = get_connection_pool(&configuration.database);

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.app.host, configuration.app.port
        ))?;

        tracing::info!(
            "Starting waitlist service on address: {}",
            listener.local_addr()?
        );

        let address = configuration.app.host.clone();
        let port = listener.local_addr()?.port();
        let server = run(listener, db_connection)?;

        Ok(Self {
            port,
            address,
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn address(&self) -> String {
        self.address.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(database: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .connect_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(database.with_db())
}

use std::net::TcpListener;

use once_cell::sync::Lazy;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use launchlist::config::{get_configuration, Configuration, DatabaseSettings};
use launchlist::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            "test".into(),
            "debug".into(),
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
    }
});

pub struct TestApp {
    pub config: Configuration,
    pub addr: String,
    pub pool: PgPool,
}

impl TestApp {
    pub async fn post_email(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/email", self.addr))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mut configuration = get_configuration().expect("should load configuration");

    // Each test run gets its own database.
    let db_name = Uuid::new_v4().to_string();
    configuration.database.database_name = db_name;
    let db_connection = configure_database(&configuration.database).await;

    let listener = TcpListener::bind(format!("{}:0", configuration.app.host.clone()))
        .expect("failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    let server =
        launchlist::run::run(listener, db_connection.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    let hostname = configuration.app.host.clone();
    TestApp {
        config: configuration,
        pool: db_connection,
        addr: format!("http://{}:{}", hostname, port),
    }
}

pub async fn configure_database(database_settings: &DatabaseSettings) -> PgPool {
    let mut db_connection = PgConnection::connect_with(&database_settings.without_db())
        .await
        .expect("failed to connect to postgres.");

    db_connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, database_settings.database_name).as_str())
        .await
        .expect("Failed to create database");

    let db_pool = PgPool::connect_with(database_settings.with_db())
        .await
        .expect("failed to connect to postgres.");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to migrate the database");

    db_pool
}

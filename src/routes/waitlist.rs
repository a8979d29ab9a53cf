use std::fmt::Formatter;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use sqlx::PgPool;
use tracing;
use uuid::Uuid;

use crate::domain::WaitlistEmail;

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{1}")]
    PersistenceError(#[source] sqlx::Error, String),
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for WaitlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::ValidationError(_) => StatusCode::BAD_REQUEST,
            WaitlistError::PersistenceError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            WaitlistError::ValidationError(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid email" }))
            }
            WaitlistError::PersistenceError(_, _) => HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Something went wrong" })),
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JoinRequest {
    // `Option` so that an absent field reaches the handler and gets the
    // same 400 body as a malformed address, instead of the extractor's
    // default rejection.
    #[serde(default)]
    email: Option<String>,
}

/// Create-or-check for a waitlist membership.
///
/// Repeat submissions of an already-registered email are a normal outcome,
/// reported with `{"exists": true}` and no write. The existence check is an
/// optimization only; the UNIQUE constraint on `waitlist_emails.email` is
/// what actually guards the check-then-insert race, and a losing insert
/// surfaces as a persistence error.
#[tracing::instrument(
name = "Adding an email to the waitlist",
skip(payload, pool),
fields(
email = tracing::field::Empty,
)
)]
pub async fn join_waitlist(
    payload: web::Json<JoinRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, WaitlistError> {
    let email = payload
        .0
        .email
        .ok_or_else(|| WaitlistError::ValidationError("missing email field".into()))
        .and_then(|raw| WaitlistEmail::parse(raw).map_err(WaitlistError::ValidationError))?;

    tracing::Span::current().record("email", &tracing::field::display(&email));

    let already_registered = find_by_email(pool.get_ref(), &email).await.map_err(|e| {
        WaitlistError::PersistenceError(e, "Failed to look up email in the waitlist".into())
    })?;

    if already_registered {
        return Ok(HttpResponse::Ok().json(serde_json::json!({ "exists": true })));
    }

    insert_email(pool.get_ref(), &email).await.map_err(|e| {
        WaitlistError::PersistenceError(e, "Failed to insert new email into the waitlist".into())
    })?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "exists": false, "added": true })))
}

#[tracing::instrument(name = "Checking waitlist for an existing email", skip(pool, email))]
pub async fn find_by_email(pool: &PgPool, email: &WaitlistEmail) -> Result<bool, sqlx::Error> {
    // Exact-match, case-sensitive lookup.
    let existing = sqlx::query("SELECT id FROM waitlist_emails WHERE email = $1")
        .bind(email.as_ref())
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

    Ok(existing.is_some())
}

#[tracing::instrument(name = "Saving new waitlist email in the database", skip(pool, email))]
pub async fn insert_email(pool: &PgPool, email: &WaitlistEmail) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO waitlist_emails (id, email, created_at) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(email.as_ref())
        .bind(Utc::now())
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

    Ok(())
}

//! Handlers that fail in each way the exception filter has to handle.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use axum::{routing::get, Json, Router};
use sqlx::error::{DatabaseError, ErrorKind};
use spystore_api::HttpFailure;
use spystore_core::Failure;
use spystore_db::ensure_rows_affected;

pub const TRACE: &str = "at spystore::cart::update line 42";

async fn invalid_quantity() -> Result<Json<()>, HttpFailure> {
    Err(Failure::invalid_quantity("Quantity must be positive")
        .with_trace(TRACE)
        .into())
}

async fn concurrency_conflict() -> Result<Json<()>, HttpFailure> {
    Err(Failure::concurrency_conflict("Row was modified by another process")
        .with_trace(TRACE)
        .into())
}

async fn general() -> Result<Json<()>, HttpFailure> {
    Err(Failure::unclassified("NullReference", "null reference")
        .with_trace(TRACE)
        .into())
}

async fn untraced() -> Result<Json<()>, HttpFailure> {
    Err(Failure::unclassified("NullReference", "").into())
}

async fn stale_write() -> Result<Json<()>, HttpFailure> {
    ensure_rows_affected(1, 0)?;
    Ok(Json(()))
}

async fn wrapped_quantity() -> Result<Json<()>, HttpFailure> {
    let err = anyhow::Error::new(Failure::invalid_quantity("Quantity exceeds stock"));
    Err(err.into())
}

async fn missing_row() -> Result<Json<()>, HttpFailure> {
    Err(sqlx::Error::RowNotFound.into())
}

/// Postgres error carrying only a SQLSTATE code.
#[derive(Debug)]
struct PgError(&'static str);

impl fmt::Display for PgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQLSTATE {}", self.0)
    }
}

impl StdError for PgError {}

impl DatabaseError for PgError {
    fn message(&self) -> &str {
        "could not serialize access due to concurrent update"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.0))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

async fn serialization_failure() -> Result<Json<()>, HttpFailure> {
    Err(sqlx::Error::Database(Box::new(PgError("40001"))).into())
}

async fn deadlock() -> Result<Json<()>, HttpFailure> {
    Err(sqlx::Error::Database(Box::new(PgError("40P01"))).into())
}

async fn unique_violation() -> Result<Json<()>, HttpFailure> {
    Err(sqlx::Error::Database(Box::new(PgError("23505"))).into())
}

async fn panics() -> Json<()> {
    panic!("handler exploded");
}

async fn ok() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn failing_routes() -> Router {
    Router::new()
        .route("/quantity", get(invalid_quantity))
        .route("/conflict", get(concurrency_conflict))
        .route("/general", get(general))
        .route("/untraced", get(untraced))
        .route("/stale", get(stale_write))
        .route("/wrapped", get(wrapped_quantity))
        .route("/missing", get(missing_row))
        .route("/serialization", get(serialization_failure))
        .route("/deadlock", get(deadlock))
        .route("/duplicate", get(unique_violation))
        .route("/panic", get(panics))
        .route("/ok", get(ok))
}

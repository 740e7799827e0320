//! HTTP error response conversion
//!
//! [`ExceptionFilter`] is the single place where a [`Failure`] becomes an HTTP
//! response. It is a pure function of the failure and the diagnostic-mode flag
//! given at construction.
//!
//! **Handler pattern:** return `Result<impl IntoResponse, HttpFailure>` and let
//! lower-layer errors convert with `?`. `HttpFailure::into_response` renders a
//! non-diagnostic body and parks the failure in the response extensions;
//! [`exception_filter_middleware`](crate::middleware::exception_filter) then
//! renders it again with the process's configured filter.

use std::any::Any;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use spystore_core::{Failure, FailureKind};
use utoipa::ToSchema;

use crate::constants::{GENERAL_ERROR, INVALID_QUANTITY_ERROR};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Error body returned for every failure.
///
/// Field names are part of the client contract and stay PascalCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    /// Short category label; empty for concurrency conflicts
    pub error: String,
    /// The failure's message, verbatim
    pub message: String,
    /// Captured trace in development mode, otherwise empty
    pub stack_trace: String,
}

/// Maps failures to responses.
///
/// `Default` is the non-diagnostic filter: traces are never exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExceptionFilter {
    is_development: bool,
}

impl ExceptionFilter {
    pub const fn new(is_development: bool) -> Self {
        Self { is_development }
    }

    pub fn is_development(&self) -> bool {
        self.is_development
    }

    /// Status code and body for a failure.
    pub fn classify(&self, failure: &Failure) -> (StatusCode, ErrorResponse) {
        let stack_trace = if self.is_development {
            failure.trace().unwrap_or_default().to_string()
        } else {
            String::new()
        };
        let message = failure.message().to_string();

        let (status, error) = match failure.kind() {
            FailureKind::InvalidQuantity => (StatusCode::BAD_REQUEST, INVALID_QUANTITY_ERROR),
            // Kept at 400 with an empty label for existing clients; 409 would be conventional.
            FailureKind::ConcurrencyConflict => (StatusCode::BAD_REQUEST, ""),
            FailureKind::Unclassified(_) => (StatusCode::INTERNAL_SERVER_ERROR, GENERAL_ERROR),
        };

        (
            status,
            ErrorResponse {
                error: error.to_string(),
                message,
                stack_trace,
            },
        )
    }

    /// Render a failure as an indented JSON response.
    pub fn render(&self, failure: &Failure) -> Response {
        let (status, body) = self.classify(failure);
        json_response(status, &body)
    }
}

fn json_response(status: StatusCode, body: &ErrorResponse) -> Response {
    match serde_json::to_vec_pretty(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize error response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                r#"{"Error":"General Error.","Message":"","StackTrace":""}"#,
            )
                .into_response()
        }
    }
}

/// Wrapper type for Failure to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for Failure (external type from spystore-core)
#[derive(Debug)]
pub struct HttpFailure(pub Failure);

impl From<Failure> for HttpFailure {
    fn from(failure: Failure) -> Self {
        HttpFailure(failure)
    }
}

impl From<anyhow::Error> for HttpFailure {
    fn from(err: anyhow::Error) -> Self {
        HttpFailure(err.into())
    }
}

impl From<sqlx::Error> for HttpFailure {
    fn from(err: sqlx::Error) -> Self {
        HttpFailure(err.into())
    }
}

impl From<std::io::Error> for HttpFailure {
    fn from(err: std::io::Error) -> Self {
        HttpFailure(err.into())
    }
}

impl From<serde_json::Error> for HttpFailure {
    fn from(err: serde_json::Error) -> Self {
        HttpFailure(err.into())
    }
}

impl IntoResponse for HttpFailure {
    fn into_response(self) -> Response {
        let mut response = ExceptionFilter::default().render(&self.0);
        response.extensions_mut().insert(self.0);
        response
    }
}

/// Panic handler for `CatchPanicLayer`: a panicking handler becomes an
/// unclassified failure and flows through the exception filter like any other.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::new()
    };

    HttpFailure(Failure::unclassified("Panic", message)).into_response()
}

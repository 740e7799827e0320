//! Exception filter middleware
//!
//! Last stop for failures on their way out. Responses produced by
//! [`HttpFailure`](crate::error::HttpFailure) carry the [`Failure`] in their
//! extensions; this layer logs it once and re-renders it with the configured
//! [`ExceptionFilter`], so the diagnostic mode decides whether traces are shown.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Router,
};
use spystore_core::{Failure, LogLevel};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{panic_response, ExceptionFilter};

/// Runs inside the request span, which carries the request id.
fn log_failure(failure: &Failure) {
    let kind = failure.kind().name();
    match failure.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %failure, kind, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %failure, kind, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %failure,
                kind,
                trace = failure.trace().unwrap_or_default(),
                "Request failed"
            );
        }
    }
}

pub async fn exception_filter_middleware(
    State(filter): State<ExceptionFilter>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<Failure>() {
        Some(failure) => {
            log_failure(&failure);
            filter.render(&failure)
        }
        None => response,
    }
}

/// Install the exception filter (and panic capture) around every route of `router`.
pub fn with_exception_filter<S>(router: Router<S>, filter: ExceptionFilter) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn_with_state(
            filter,
            exception_filter_middleware,
        ))
}

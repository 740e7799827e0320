//! Route configuration and setup.

pub(crate) mod health;

use crate::constants::OPENAPI_PATH;
use crate::middleware::{request_id_middleware, with_exception_filter};
use crate::state::AppState;
use anyhow::Context;
use axum::{http::HeaderValue, routing::get, Json, Router};
use spystore_core::Config;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let filter = state.filter;

    let routes = Router::new()
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state);

    let app = with_exception_filter(routes, filter)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}

/// CORS policy. Credentials are always allowed, so "all origins" mirrors the
/// request's origin, methods and headers instead of answering with `*`.
pub fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let allow_origin = if config.allows_any_origin() {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

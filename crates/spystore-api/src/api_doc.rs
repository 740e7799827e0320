//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::setup::routes::health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SpyStore API",
        version = "0.1.0",
        description = "SpyStore service. Every failure is reported as an ErrorResponse body."
    ),
    paths(health::liveness_check, health::readiness_check),
    components(schemas(ErrorResponse, health::HealthResponse)),
    tags((name = "health", description = "Liveness and readiness probes"))
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

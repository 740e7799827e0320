//! API constants

/// Served OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// `Error` field for invalid-quantity failures
pub const INVALID_QUANTITY_ERROR: &str = "Invalid quantity request.";

/// `Error` field for unclassified failures
pub const GENERAL_ERROR: &str = "General Error.";

//! SpyStore API Library
//!
//! This crate provides the HTTP pipeline: application setup, middleware, and the
//! exception filter that turns every escaping failure into a JSON response.

// Module declarations
mod api_doc;
pub mod constants;
mod telemetry;

// Public modules
pub mod error;
pub mod middleware;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, ExceptionFilter, HttpFailure};

//! SpyStore Core Library
//!
//! This crate provides the failure taxonomy and configuration shared by the
//! SpyStore service crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, DatabaseSettings};
#[cfg(feature = "sqlx")]
pub use error::is_concurrency_conflict;
pub use error::{Failure, FailureKind, LogLevel};

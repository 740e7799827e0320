//! Failure types module
//!
//! Every failure that can escape a request handler is a [`Failure`]: a closed
//! [`FailureKind`] tag plus the message and optional trace text captured when it
//! was raised. Lower layers propagate failures unchanged with `?`; only the HTTP
//! layer turns them into responses, and it decides from the tag alone.
//!
//! The `From<sqlx::Error>` conversion is gated behind the `sqlx` feature.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// SQLSTATE codes Postgres raises when a write loses a concurrency race.
#[cfg(feature = "sqlx")]
const SERIALIZATION_FAILURE: &str = "40001";
#[cfg(feature = "sqlx")]
const DEADLOCK_DETECTED: &str = "40P01";

/// Log level for failure reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for caller mistakes like invalid quantities
    Debug,
    /// Warning level - for recoverable races like concurrency conflicts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Category of a [`Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A requested quantity violates a business rule (negative, above stock).
    InvalidQuantity,
    /// An optimistic-concurrency violation while writing to the data store.
    ConcurrencyConflict,
    /// Anything else. The string names where the failure came from and is only
    /// used for logging.
    Unclassified(String),
}

impl FailureKind {
    /// Short name used in log fields.
    pub fn name(&self) -> &str {
        match self {
            FailureKind::InvalidQuantity => "InvalidQuantity",
            FailureKind::ConcurrencyConflict => "ConcurrencyConflict",
            FailureKind::Unclassified(kind) => kind,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            FailureKind::InvalidQuantity => LogLevel::Debug,
            FailureKind::ConcurrencyConflict => LogLevel::Warn,
            FailureKind::Unclassified(_) => LogLevel::Error,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    trace: Option<String>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
        }
    }

    pub fn invalid_quantity(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidQuantity, message)
    }

    pub fn concurrency_conflict(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ConcurrencyConflict, message)
    }

    pub fn unclassified(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified(kind.into()), message)
    }

    /// Attach trace text explicitly.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Attach the current call stack when backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`). No-op otherwise.
    pub fn capture_trace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.trace = Some(backtrace.to_string());
        }
        self
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    pub fn log_level(&self) -> LogLevel {
        self.kind.log_level()
    }
}

/// Whether a database error is Postgres reporting a lost concurrency race.
#[cfg(feature = "sqlx")]
pub fn is_concurrency_conflict(err: &SqlxError) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for Failure {
    fn from(err: SqlxError) -> Self {
        let kind = if is_concurrency_conflict(&err) {
            FailureKind::ConcurrencyConflict
        } else {
            FailureKind::Unclassified("DatabaseError".to_string())
        };
        Failure::new(kind, err.to_string()).capture_trace()
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        // A failure wrapped in anyhow somewhere below keeps its classification.
        let err = match err.downcast::<Failure>() {
            Ok(failure) => return failure,
            Err(err) => err,
        };

        let failure = Failure::unclassified("InternalError", err.to_string());
        let backtrace = err.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            failure.with_trace(backtrace.to_string())
        } else {
            failure
        }
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Failure::unclassified("IoError", err.to_string()).capture_trace()
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Failure::unclassified("SerializationError", err.to_string()).capture_trace()
    }
}

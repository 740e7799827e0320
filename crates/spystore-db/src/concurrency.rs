//! Optimistic-concurrency checks
//!
//! Versioned writes (`UPDATE ... WHERE id = $1 AND row_version = $2`) touch no
//! rows when another writer got there first. These helpers turn that outcome,
//! and Postgres serialization failures, into a
//! [`FailureKind::ConcurrencyConflict`](spystore_core::FailureKind).

use spystore_core::Failure;
use sqlx::postgres::PgQueryResult;

pub use spystore_core::is_concurrency_conflict;

/// Fail with a concurrency conflict unless a write touched exactly `expected` rows.
pub fn ensure_rows_affected(expected: u64, actual: u64) -> Result<(), Failure> {
    if expected == actual {
        return Ok(());
    }

    tracing::debug!(expected, actual, "Optimistic concurrency check failed");
    Err(Failure::concurrency_conflict(format!(
        "Database operation expected to affect {} row(s) but actually affected {} row(s). \
         Data may have been modified or deleted since entities were loaded.",
        expected, actual
    ))
    .capture_trace())
}

/// [`ensure_rows_affected`] for a single-row versioned write.
pub fn ensure_single_row(result: &PgQueryResult) -> Result<(), Failure> {
    ensure_rows_affected(1, result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spystore_core::FailureKind;

    #[test]
    fn test_matching_row_count_passes() {
        assert!(ensure_rows_affected(1, 1).is_ok());
        assert!(ensure_rows_affected(3, 3).is_ok());
    }

    #[test]
    fn test_stale_write_is_a_conflict() {
        let failure = ensure_rows_affected(1, 0).unwrap_err();
        assert_eq!(failure.kind(), &FailureKind::ConcurrencyConflict);
        assert_eq!(
            failure.message(),
            "Database operation expected to affect 1 row(s) but actually affected 0 row(s). \
             Data may have been modified or deleted since entities were loaded."
        );
    }

    #[test]
    fn test_single_row_helper() {
        let untouched = PgQueryResult::default();
        let failure = ensure_single_row(&untouched).unwrap_err();
        assert_eq!(failure.kind(), &FailureKind::ConcurrencyConflict);
    }
}

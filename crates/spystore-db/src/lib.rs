//! Data access plumbing
//!
//! Connection assembly and pool creation, the per-request [`StoreContext`], and
//! the optimistic-concurrency checks that raise
//! [`FailureKind::ConcurrencyConflict`](spystore_core::FailureKind). Repositories
//! built on top of this crate report write collisions through these helpers so
//! the HTTP layer can classify them.

pub mod concurrency;
pub mod connection;
pub mod store;

pub use concurrency::{ensure_rows_affected, ensure_single_row, is_concurrency_conflict};
pub use connection::{connect_options, create_pool, create_lazy_pool};
pub use store::StoreContext;

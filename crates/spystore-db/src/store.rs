use spystore_core::Failure;
use sqlx::PgPool;

/// Handle to the store shared by all requests.
///
/// Cloning is cheap; every clone draws connections from the same pool, so each
/// request holds at most the connections it is currently using.
#[derive(Clone, Debug)]
pub struct StoreContext {
    pool: PgPool,
}

impl StoreContext {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query to prove the database is reachable.
    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    pub async fn ping(&self) -> Result<(), Failure> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

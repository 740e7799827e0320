//! Connection assembly and pool creation

use spystore_core::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

const IDLE_TIMEOUT_SECS: u64 = 600;
const MAX_LIFETIME_SECS: u64 = 1800;

/// Typed connection options for the configured Postgres instance.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .database(&settings.name)
        .username(&settings.username);

    if settings.password.is_empty() {
        options
    } else {
        options.password(&settings.password)
    }
}

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.timeout_seconds))
        .idle_timeout(Duration::from_secs(IDLE_TIMEOUT_SECS))
        .max_lifetime(Duration::from_secs(MAX_LIFETIME_SECS))
}

/// Open a pool and establish the first connection.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    pool_options(settings)
        .connect_with(connect_options(settings))
        .await
}

/// Create a pool that connects on first use.
///
/// Must be called from within a tokio runtime.
pub fn create_lazy_pool(settings: &DatabaseSettings) -> PgPool {
    pool_options(settings).connect_lazy_with(connect_options(settings))
}

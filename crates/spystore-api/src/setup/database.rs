//! Database setup and initialization

use anyhow::{Context, Result};
use spystore_core::Config;
use sqlx::PgPool;

/// Setup database connection pool
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!(connection = %config.database.describe(), "Connecting to database...");

    let pool = spystore_db::create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Database connected successfully"
    );

    Ok(pool)
}

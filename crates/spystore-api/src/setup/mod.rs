//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod validation;

use crate::error::ExceptionFilter;
use crate::state::AppState;
use anyhow::{Context, Result};
use spystore_core::Config;
use spystore_db::StoreContext;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_development())
        .context("Failed to initialize telemetry")?;

    // Fail fast on misconfiguration, before touching the database
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment,
        development = config.is_development(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let state = build_state(&config, StoreContext::new(pool));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Wire the shared state. The exception filter's mode is fixed here for the
/// lifetime of the process.
pub fn build_state(config: &Config, store: StoreContext) -> Arc<AppState> {
    Arc::new(AppState::new(
        store,
        ExceptionFilter::new(config.is_development()),
    ))
}

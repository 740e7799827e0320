//! Test helpers: build configuration, state and routers for integration tests.
//!
//! No database is required: the store is a lazily-connected pool pointed at a
//! closed port, so only readiness checks ever try to reach it.

#![allow(dead_code)]

pub mod handlers;

use axum::Router;
use axum_test::TestServer;
use spystore_api::error::ExceptionFilter;
use spystore_api::middleware::{request_id_middleware, with_exception_filter};
use spystore_api::setup::{build_state, routes::setup_routes};
use spystore_core::Config;
use spystore_db::{create_lazy_pool, StoreContext};

/// Build a configuration from explicit variables only (process env is ignored).
pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut all: Vec<(String, String)> = vec![
        ("PG_HOST".to_string(), "127.0.0.1".to_string()),
        ("PG_PORT".to_string(), "1".to_string()),
        ("DB_TIMEOUT_SECONDS".to_string(), "1".to_string()),
    ];
    all.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|key| {
        all.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

/// Full application router, as served by the binary.
pub fn test_app(config: &Config) -> TestServer {
    let store = StoreContext::new(create_lazy_pool(&config.database));
    let state = build_state(config, store);
    let router = setup_routes(config, state).expect("routes");
    TestServer::new(router).expect("test server")
}

/// Failure-raising routes behind the exception filter.
pub fn failing_app(is_development: bool) -> TestServer {
    let router: Router = with_exception_filter(
        handlers::failing_routes(),
        ExceptionFilter::new(is_development),
    )
    .layer(axum::middleware::from_fn(request_id_middleware));
    TestServer::new(router).expect("test server")
}

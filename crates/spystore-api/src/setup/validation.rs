//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use spystore_core::Config;

/// Validate critical configuration values
///
/// Fails on values that would make the service unusable. The permissive CORS
/// warning is emitted by [`setup_cors`](super::routes::setup_cors).
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server_port == 0 {
        return Err(anyhow::anyhow!("SERVER_PORT cannot be 0"));
    }

    if config.database.name.trim().is_empty() {
        return Err(anyhow::anyhow!("PG_DB cannot be empty"));
    }

    if config.database.max_connections == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.database.timeout_seconds == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .expect("config")
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&config(&[])).is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(validate_config(&config(&[("SERVER_PORT", "0")])).is_err());
    }

    #[test]
    fn test_zero_connections_rejected() {
        assert!(validate_config(&config(&[("DB_MAX_CONNECTIONS", "0")])).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(validate_config(&config(&[("DB_TIMEOUT_SECONDS", "0")])).is_err());
    }

    #[test]
    fn test_empty_database_name_rejected() {
        assert!(validate_config(&config(&[("PG_DB", " ")])).is_err());
    }
}

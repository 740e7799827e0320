//! Configuration module
//!
//! Settings are read once at startup and never change afterwards. Sources, in
//! increasing precedence:
//!
//! 1. `appsettings.json` in the content root
//! 2. `appsettings.{environment}.json`
//! 3. `app.json`
//! 4. process environment (after an optional `.env` file)
//!
//! Every file is optional. Keys are matched case-insensitively, so `pg_host`
//! in `app.json` and `PG_HOST` in the environment name the same setting.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use figment::providers::{Format, Json};
use figment::Figment;
use serde_json::Value;

const ENVIRONMENT: &str = "production";
const SERVER_HOST: &str = "0.0.0.0";
const SERVER_PORT: u16 = 40001;
const CORS_ALLOW_ALL: &str = "*";
const PG_HOST: &str = "localhost";
const PG_PORT: u16 = 5432;
const PG_DB: &str = "spystore";
const PG_USER: &str = "postgres";
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Postgres connection settings.
#[derive(Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

impl DatabaseSettings {
    /// Connection description safe for logs (password masked).
    pub fn describe(&self) -> String {
        let password = if self.password.is_empty() { "" } else { "****" };
        format!(
            "Host={}; Port={}; Database={}; Username={}; Password={}",
            self.host, self.port, self.name, self.username, password
        )
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database: DatabaseSettings,
}

impl Config {
    /// Load settings files from the working directory, then the environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let content_root = env::current_dir().context("Failed to resolve working directory")?;
        Self::load(&content_root)
    }

    /// Load settings files from `content_root`, then the environment.
    pub fn load(content_root: &Path) -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::load_with(content_root, |key| env::var(key).ok())
    }

    /// Layer the settings files under `env_lookup`.
    ///
    /// The environment name that selects `appsettings.{environment}.json` is
    /// taken from `env_lookup` only.
    pub fn load_with<F>(content_root: &Path, env_lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_lookup = |key: &str| env_lookup(key).or_else(|| env_lookup(&key.to_lowercase()));
        let environment = env_lookup("ENVIRONMENT")
            .or_else(|| env_lookup("APP_ENV"))
            .unwrap_or_else(|| ENVIRONMENT.to_string());
        let files = read_settings_files(content_root, &environment)?;

        Self::from_lookup(|key| match key {
            "ENVIRONMENT" => Some(environment.clone()),
            _ => env_lookup(key).or_else(|| files.get(&key.to_lowercase()).cloned()),
        })
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Each key is looked up as written, then in lower case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).or_else(|| lookup(&key.to_lowercase()));

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| ENVIRONMENT.to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| CORS_ALLOW_ALL.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database = DatabaseSettings {
            host: lookup("PG_HOST").unwrap_or_else(|| PG_HOST.to_string()),
            port: parse_or(&lookup, "PG_PORT", PG_PORT)?,
            name: lookup("PG_DB").unwrap_or_else(|| PG_DB.to_string()),
            username: lookup("PG_USER").unwrap_or_else(|| PG_USER.to_string()),
            password: lookup("PG_PASS").unwrap_or_default(),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
        };

        Ok(Config {
            environment,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| SERVER_HOST.to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", SERVER_PORT)?,
            cors_origins,
            database,
        })
    }

    /// Diagnostic mode: failure traces are exposed to clients.
    pub fn is_development(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "development" || environment == "dev"
    }

    /// Whether the CORS policy admits every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == CORS_ALLOW_ALL)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Merge the optional JSON settings files into a flat map of lower-cased keys.
/// Later files override earlier ones; only scalar values are kept.
fn read_settings_files(
    content_root: &Path,
    environment: &str,
) -> Result<HashMap<String, String>, anyhow::Error> {
    let files = [
        "appsettings.json".to_string(),
        format!("appsettings.{}.json", environment),
        "app.json".to_string(),
    ];

    let mut settings = HashMap::new();
    for file in &files {
        let path = content_root.join(file);
        let values: BTreeMap<String, Value> = Figment::from(Json::file(&path))
            .extract()
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        for (key, value) in values {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            settings.insert(key.to_lowercase(), value);
        }
    }
    Ok(settings)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

use std::{collections::HashMap, env};

use pdp_core::config::{
    keys, resolve_cache, resolve_store, CacheSettings, ConfigurationError, StoreDescriptor,
};

/// Comma-separated list of origins allowed by CORS.
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";

/// Origin of the storefront during local development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3001";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreDescriptor,
    pub cache: CacheSettings,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file is expected to have been loaded already; see `main`.
    ///
    /// Environment variables:
    /// - `DB_TYPE` - `sqlite` or `postgres` (default: postgres)
    /// - `DB_DATABASE` - SQLite file path, or Postgres database name
    /// - `DB_HOST`, `DB_PORT`, `DB_USERNAME`, `DB_PASSWORD` - Postgres only
    /// - `APP_ENV` - `development` turns on SQL statement logging
    ///   (`NODE_ENV` is read when `APP_ENV` is unset)
    /// - `CACHE_TTL` - Cache TTL in milliseconds (default: 60000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CORS_ORIGINS` - Allowed origins (default: http://localhost:3001)
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let settings: HashMap<String, String> = keys::ALL
            .iter()
            .chain(std::iter::once(&CORS_ORIGINS))
            .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();

        Self::from_settings(&settings)
    }

    /// Build configuration from an explicit settings map.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            store: resolve_store(settings)?,
            cache: resolve_cache(settings),
            cors_origins: parse_origins(settings.get(CORS_ORIGINS).map(String::as_str)),
        })
    }
}

fn parse_origins(value: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_CORS_ORIGIN.to_string()]
    } else {
        origins
    }
}

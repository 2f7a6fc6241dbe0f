//! Store configuration resolution.
//!
//! Turns a map of named settings into a validated [`StoreDescriptor`]. The
//! two backends differ in schema policy: the embedded SQLite
//! store derives its schema from the entity descriptors at startup, while
//! the networked Postgres store only changes schema through migrations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::product::{EntitySchema, ENTITIES};

use super::error::ConfigurationError;
use super::keys;

/// Directory the Postgres migrations are embedded from.
pub const MIGRATIONS_DIR: &str = "migrations";

/// Value of the environment flag that turns on statement logging.
pub const DEVELOPMENT_ENV: &str = "development";

/// Supported storage engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" => Ok(Backend::Postgres),
            other => Err(ConfigurationError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Connection descriptor for the embedded single-file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteDescriptor {
    pub path: String,
    pub entities: &'static [EntitySchema],
    pub synchronize: bool,
    pub logging: bool,
}

/// Connection descriptor for the networked relational store.
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresDescriptor {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub entities: &'static [EntitySchema],
    /// Label of the migration set, used in logs. The migrations themselves
    /// are embedded into the binary at build time.
    pub migrations: &'static str,
    pub migrations_run: bool,
    pub synchronize: bool,
    pub logging: bool,
}

impl fmt::Debug for PostgresDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("migrations", &self.migrations)
            .field("migrations_run", &self.migrations_run)
            .field("synchronize", &self.synchronize)
            .field("logging", &self.logging)
            .finish()
    }
}

/// A validated descriptor for one of the supported backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreDescriptor {
    Sqlite(SqliteDescriptor),
    Postgres(PostgresDescriptor),
}

impl StoreDescriptor {
    pub fn backend(&self) -> Backend {
        match self {
            StoreDescriptor::Sqlite(_) => Backend::Sqlite,
            StoreDescriptor::Postgres(_) => Backend::Postgres,
        }
    }

    /// Whether executed SQL statements are logged.
    pub fn logging(&self) -> bool {
        match self {
            StoreDescriptor::Sqlite(d) => d.logging,
            StoreDescriptor::Postgres(d) => d.logging,
        }
    }
}

/// Resolves the store descriptor from named settings.
///
/// Blank values are treated as absent. The backend defaults to Postgres
/// when `DB_TYPE` is not set. `APP_ENV` selects the run mode, with
/// `NODE_ENV` accepted when it is unset.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use pdp_core::config::{resolve_store, Backend};
///
/// let settings = HashMap::from([
///     ("DB_TYPE".to_string(), "sqlite".to_string()),
///     ("DB_DATABASE".to_string(), "pdp.db".to_string()),
/// ]);
/// let descriptor = resolve_store(&settings).unwrap();
/// assert_eq!(descriptor.backend(), Backend::Sqlite);
/// ```
pub fn resolve_store(
    settings: &HashMap<String, String>,
) -> Result<StoreDescriptor, ConfigurationError> {
    // Blank values count as absent. Selectors and the port are compared
    // trimmed; connection values are kept exactly as given.
    let raw = |key: &str| {
        settings
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    };
    let get = |key: &str| raw(key).map(str::trim);

    let backend = match get(keys::DB_TYPE) {
        Some(value) => value.parse()?,
        None => Backend::Postgres,
    };
    let mode = get(keys::APP_ENV).or_else(|| get(keys::NODE_ENV));
    let logging = mode == Some(DEVELOPMENT_ENV);

    match backend {
        Backend::Sqlite => {
            let path = raw(keys::DB_DATABASE).ok_or(ConfigurationError::MissingSettings {
                backend,
                settings: vec![keys::DB_DATABASE],
            })?;

            Ok(StoreDescriptor::Sqlite(SqliteDescriptor {
                path: path.to_string(),
                entities: ENTITIES,
                synchronize: true,
                logging,
            }))
        }
        Backend::Postgres => {
            let required = [
                keys::DB_HOST,
                keys::DB_PORT,
                keys::DB_USERNAME,
                keys::DB_PASSWORD,
                keys::DB_DATABASE,
            ];
            let missing: Vec<&'static str> =
                required.into_iter().filter(|key| get(*key).is_none()).collect();
            if !missing.is_empty() {
                return Err(ConfigurationError::MissingSettings {
                    backend,
                    settings: missing,
                });
            }

            // Every required key is present past this point.
            let value = |key: &str| raw(key).unwrap_or_default().to_string();
            let port = get(keys::DB_PORT)
                .unwrap_or_default()
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidSetting {
                    setting: keys::DB_PORT,
                    reason: "expected a port number",
                })?;

            Ok(StoreDescriptor::Postgres(PostgresDescriptor {
                host: value(keys::DB_HOST),
                port,
                username: value(keys::DB_USERNAME),
                password: value(keys::DB_PASSWORD),
                database: value(keys::DB_DATABASE),
                entities: ENTITIES,
                migrations: MIGRATIONS_DIR,
                migrations_run: true,
                synchronize: false,
                logging,
            }))
        }
    }
}

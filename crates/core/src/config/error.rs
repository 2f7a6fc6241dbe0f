use thiserror::Error;

use super::Backend;

/// Errors raised while resolving configuration.
///
/// Messages name the offending settings but never echo their values, so
/// credentials supplied alongside a missing setting cannot leak into logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{backend} configuration is incomplete, missing: {}", .settings.join(", "))]
    MissingSettings {
        backend: Backend,
        settings: Vec<&'static str>,
    },
    #[error("Invalid value for {setting}: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: &'static str,
    },
    #[error("Unsupported database type: {0}")]
    UnsupportedBackend(String),
}

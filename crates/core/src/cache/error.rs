use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// The lookup service never surfaces these to its callers; they are logged
/// and the request falls through to the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

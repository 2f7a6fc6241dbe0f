use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Absence is not an error: lookups return `Ok(None)`. Everything other than
/// `DuplicateKey` is a general store failure, surfaced to the caller once
/// and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {key}")]
    DuplicateKey {
        entity_type: &'static str,
        key: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Short name of the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::DuplicateKey { .. } => "duplicate_key",
            RepositoryError::ConnectionFailed(_) => "connection_failed",
            RepositoryError::QueryFailed(_) => "query_failed",
            RepositoryError::Serialization(_) => "serialization",
            RepositoryError::InvalidData(_) => "invalid_data",
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

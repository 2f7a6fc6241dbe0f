//! Pure mapping from repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `DuplicateKey` -> 409
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
/// - `InvalidData` -> 400
///
/// # Examples
///
/// ```
/// use pdp_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::DuplicateKey {
///     entity_type: "Product",
///     key: "sf-comfort-3l-bg".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 409);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::DuplicateKey { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

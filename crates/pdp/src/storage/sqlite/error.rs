//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`
//! from `pdp_core::storage`.

use pdp_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::DuplicateKey`
/// - `SQLITE_CONSTRAINT_CHECK` / `NOTNULL` → `RepositoryError::InvalidData`
/// - `CannotOpen` → `RepositoryError::ConnectionFailed`
/// - Row conversion failures → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    key: &str,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::DuplicateKey {
                entity_type,
                key: key.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_CHECK
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL =>
        {
            RepositoryError::InvalidData(format!("{entity_type} violates a column constraint: {err}"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// `key` names the row the statement was about (a SKU, or a summary for
/// batch statements) and ends up in `DuplicateKey`.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    key: impl AsRef<str>,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, key.as_ref())
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

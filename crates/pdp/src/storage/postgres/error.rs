//! PostgreSQL error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `pdp_core::storage`.

use pdp_core::storage::RepositoryError;
use sqlx::postgres::PgDatabaseError;

/// Maps a sqlx error to a RepositoryError.
///
/// - Unique violation → `RepositoryError::DuplicateKey`, keyed by the value
///   Postgres reports in the error detail
/// - Check / not-null violation → `RepositoryError::InvalidData`
/// - Pool and transport errors → `RepositoryError::ConnectionFailed`
/// - Decode errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            let key = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail())
                .and_then(duplicate_key_from_detail)
                .unwrap_or_else(|| "unknown".to_string());
            RepositoryError::DuplicateKey { entity_type, key }
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            RepositoryError::InvalidData(format!("{entity_type}: {}", db_err.message()))
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23502") => {
            RepositoryError::InvalidData(format!("{entity_type}: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => RepositoryError::ConnectionFailed(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => RepositoryError::Serialization(err.to_string()),
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Extracts the offending value from a unique-violation detail such as
/// `Key (sku)=(sf-comfort-3l-bg) already exists.`
fn duplicate_key_from_detail(detail: &str) -> Option<String> {
    let start = detail.find(")=(")? + 3;
    let end = detail.rfind(')')?;
    (end > start).then(|| detail[start..end].to_string())
}

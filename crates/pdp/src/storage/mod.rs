//! Storage backend implementations.
//!
//! This module provides concrete implementations of `ProductRepository`
//! from `pdp_core::storage` and the [`Store`] handle that owns whichever
//! backend the resolved [`StoreDescriptor`] selects.

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

use pdp_core::config::{Backend, StoreDescriptor};
use pdp_core::storage::ProductRepository;

pub use postgres::PostgresRepository;
pub use sqlite::SqliteRepository;

/// Opening the persistent store failed.
#[derive(Debug, Error)]
#[error("Failed to initialize {backend} store: {source}")]
pub struct StoreInitializationError {
    pub backend: Backend,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl StoreInitializationError {
    fn new(backend: Backend, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            backend,
            source: Box::new(source),
        }
    }
}

/// Errors returned by maintenance operations on an open store.
#[derive(Debug, Error)]
pub enum StoreMaintenanceError {
    #[error("{0} store does not support migrations")]
    MigrationsUnsupported(Backend),
    #[error(transparent)]
    Migration(#[from] sqlx::Error),
}

/// An open persistent store.
///
/// Created once at startup with [`Store::open`], shared by every request
/// through [`Store::repository`], and shut down with [`Store::close`].
#[derive(Clone)]
pub enum Store {
    Sqlite(Arc<SqliteRepository>),
    Postgres(Arc<PostgresRepository>),
}

impl Store {
    /// Opens the backend described by `descriptor`.
    ///
    /// For Postgres this also applies pending migrations; for SQLite it
    /// synchronizes the schema from the entity descriptors.
    pub async fn open(descriptor: &StoreDescriptor) -> Result<Self, StoreInitializationError> {
        tracing::debug!(
            backend = %descriptor.backend(),
            statement_logging = descriptor.logging(),
            "Opening store"
        );

        let store = match descriptor {
            StoreDescriptor::Sqlite(d) => SqliteRepository::open(d)
                .await
                .map(|repo| Store::Sqlite(Arc::new(repo)))
                .map_err(|e| StoreInitializationError::new(Backend::Sqlite, e))?,
            StoreDescriptor::Postgres(d) => PostgresRepository::open(d)
                .await
                .map(|repo| Store::Postgres(Arc::new(repo)))
                .map_err(|e| StoreInitializationError::new(Backend::Postgres, e))?,
        };

        Ok(store)
    }

    pub fn backend(&self) -> Backend {
        match self {
            Store::Sqlite(_) => Backend::Sqlite,
            Store::Postgres(_) => Backend::Postgres,
        }
    }

    /// Returns the repository handle shared by the lookup service and seeder.
    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        match self {
            Store::Sqlite(repo) => repo.clone(),
            Store::Postgres(repo) => repo.clone(),
        }
    }

    /// Reverts the most recently applied migration.
    pub async fn revert_last_migration(&self) -> Result<Option<i64>, StoreMaintenanceError> {
        match self {
            Store::Postgres(repo) => Ok(repo.revert_last_migration().await?),
            Store::Sqlite(_) => Err(StoreMaintenanceError::MigrationsUnsupported(
                Backend::Sqlite,
            )),
        }
    }

    /// Closes the store. Errors are logged; there is nothing left to do
    /// with the store afterwards.
    pub async fn close(self) {
        match self {
            Store::Sqlite(repo) => {
                if let Err(err) = repo.close().await {
                    tracing::warn!(error = %err, "Failed to close SQLite store");
                }
            }
            Store::Postgres(repo) => repo.close().await,
        }
        tracing::info!("Store closed");
    }
}

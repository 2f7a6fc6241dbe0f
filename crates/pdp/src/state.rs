//! Shared application state passed to every request handler.

use std::sync::Arc;
use std::time::Duration;

use pdp_core::cache::Cache;
use pdp_core::storage::ProductRepository;

use crate::{lookup::ProductLookupService, seeder::Seeder};

/// Shared application state.
///
/// Cloned for each request; every field is a cheap handle onto the single
/// store and cache opened at startup.
#[derive(Clone)]
pub struct AppState {
    /// Read-through product lookup.
    pub lookup: Arc<ProductLookupService>,
    /// Administrative seeding.
    pub seeder: Arc<Seeder>,
    /// Direct store access for the health check.
    pub repository: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            lookup: Arc::new(ProductLookupService::new(
                repository.clone(),
                cache,
                cache_ttl,
            )),
            seeder: Arc::new(Seeder::new(repository.clone())),
            repository,
        }
    }
}

//! Product lookup with a read-through cache.
//!
//! The cache is consulted first; on a miss the store is queried and the
//! result written back with a fixed TTL. Cache failures never fail a lookup:
//! a failed read is treated as a miss and a failed write is only logged.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use pdp_core::cache::{product_key, serialize_product, Cache, CacheRead};
use pdp_core::product::Product;
use pdp_core::storage::{ProductRepository, RepositoryError};

/// Errors surfaced by [`ProductLookupService::find_by_sku`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Product not found")]
    NotFound { sku: String },
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Read-through cache in front of the product repository.
#[derive(Clone)]
pub struct ProductLookupService {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl ProductLookupService {
    /// Creates a lookup service. Every cache write uses `ttl`.
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Returns the active product with the given SKU.
    ///
    /// Concurrent misses for the same SKU each query the store and each
    /// write the cache; the writes carry equivalent values.
    pub async fn find_by_sku(&self, sku: &str) -> Result<Product, LookupError> {
        let key = product_key(sku);

        let read = CacheRead::classify(self.cache.get(&key).await);
        log_cache_read(sku, &read);
        if let Some(product) = read.into_product() {
            return Ok(product);
        }

        let product = self
            .repository
            .find_active_by_sku(sku)
            .await?
            .ok_or_else(|| LookupError::NotFound {
                sku: sku.to_string(),
            })?;

        self.populate(&key, &product).await;

        Ok(product)
    }

    async fn populate(&self, key: &str, product: &Product) {
        let bytes = match serialize_product(product) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(sku = %product.sku, error = %err, "Failed to encode product for cache");
                return;
            }
        };

        match self.cache.set(key, &bytes, Some(self.ttl)).await {
            Ok(()) => tracing::trace!(sku = %product.sku, "Product cached"),
            Err(err) => tracing::warn!(sku = %product.sku, error = %err, "Failed to cache product"),
        }
    }
}

fn log_cache_read(sku: &str, read: &CacheRead) {
    match read {
        CacheRead::Hit(_) => tracing::trace!(sku, "Cache hit for product"),
        CacheRead::Miss => tracing::trace!(sku, "Cache miss for product"),
        CacheRead::Stale(err) => {
            tracing::warn!(sku, error = %err, "Cached product could not be decoded");
        }
        CacheRead::Failed(err) => {
            tracing::warn!(sku, error = %err, "Cache read failed");
        }
    }
}

use async_trait::async_trait;

use crate::product::{NewProduct, Product};

use super::Result;

/// Query surface over the persistent product store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Finds the active product with the given SKU.
    ///
    /// Soft-deleted rows are never returned. Absence is `Ok(None)`.
    async fn find_active_by_sku(&self, sku: &str) -> Result<Option<Product>>;

    /// Inserts a batch of products and returns them as stored.
    ///
    /// Fails with `RepositoryError::DuplicateKey` if any SKU collides with an
    /// active product; no row of the batch is kept in that case.
    async fn save_all(&self, products: &[NewProduct]) -> Result<Vec<Product>>;

    /// Counts every row, soft-deleted ones included.
    async fn count_all(&self) -> Result<u64>;

    /// Deletes every row, soft-deleted ones included, and returns how many
    /// were removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Checks that the store answers queries.
    async fn ping(&self) -> Result<()>;
}

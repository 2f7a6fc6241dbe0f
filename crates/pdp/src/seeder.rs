//! Idempotent population of the product store with the sample batch.

use std::sync::Arc;

use pdp_core::product::sample_products;
use pdp_core::storage::{ProductRepository, Result};

/// What a call to [`Seeder::seed_products`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and this many products were inserted.
    Seeded(usize),
    /// The store already held rows; nothing was written.
    Skipped { existing: u64 },
}

#[derive(Clone)]
pub struct Seeder {
    repository: Arc<dyn ProductRepository>,
}

impl Seeder {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Inserts the sample batch when the store holds no rows at all.
    ///
    /// Soft-deleted rows count as existing, so a store whose products were
    /// all soft-deleted is not re-seeded.
    pub async fn seed_products(&self) -> Result<SeedOutcome> {
        tracing::info!("Starting product seeding");

        let existing = self.repository.count_all().await.map_err(|err| {
            tracing::error!(error = %err, "Failed to count products");
            err
        })?;
        if existing > 0 {
            tracing::info!(existing, "Products already exist, skipping seeding");
            return Ok(SeedOutcome::Skipped { existing });
        }

        let batch = sample_products();
        match self.repository.save_all(&batch).await {
            Ok(saved) => {
                tracing::info!(count = saved.len(), "Seeded products");
                Ok(SeedOutcome::Seeded(saved.len()))
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to seed products");
                Err(err)
            }
        }
    }

    /// Removes every product row and returns how many were deleted.
    pub async fn clear_products(&self) -> Result<u64> {
        tracing::info!("Clearing all products");
        match self.repository.delete_all().await {
            Ok(deleted) => {
                tracing::info!(deleted, "All products cleared");
                Ok(deleted)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to clear products");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::RwLock;

    use pdp_core::product::{NewProduct, Product};
    use pdp_core::storage::RepositoryError;

    use super::*;

    // Mock repository that counts batch inserts
    #[derive(Default)]
    struct MockProductRepository {
        products: RwLock<Vec<Product>>,
        save_calls: AtomicUsize,
        fail_save: bool,
        fail_with: Option<RepositoryError>,
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn find_active_by_sku(&self, sku: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .read()
                .await
                .iter()
                .find(|p| p.sku == sku && p.is_active())
                .cloned())
        }

        async fn save_all(&self, products: &[NewProduct]) -> Result<Vec<Product>> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_save {
                return Err(RepositoryError::DuplicateKey {
                    entity_type: "Product",
                    key: products[0].sku.clone(),
                });
            }

            let mut stored = self.products.write().await;
            let now = Utc::now();
            let saved: Vec<Product> = products
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, p)| p.into_product((stored.len() + i + 1) as i64, now))
                .collect();
            stored.extend(saved.iter().cloned());
            Ok(saved)
        }

        async fn count_all(&self) -> Result<u64> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            Ok(self.products.read().await.len() as u64)
        }

        async fn delete_all(&self) -> Result<u64> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut stored = self.products.write().await;
            let count = stored.len() as u64;
            stored.clear();
            Ok(count)
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = Arc::new(MockProductRepository::default());
        let seeder = Seeder::new(repo.clone());

        let first = seeder.seed_products().await.unwrap();
        let second = seeder.seed_products().await.unwrap();

        assert_eq!(first, SeedOutcome::Seeded(4));
        assert_eq!(second, SeedOutcome::Skipped { existing: 4 });
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repo.count_all().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seed_skips_store_with_only_deleted_rows() {
        let repo = Arc::new(MockProductRepository::default());
        let mut deleted = sample_products().remove(0).into_product(1, Utc::now());
        deleted.deleted_at = Some(Utc::now());
        repo.products.write().await.push(deleted);

        let outcome = Seeder::new(repo.clone()).seed_products().await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing: 1 });
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_then_seed_repopulates_once() {
        let repo = Arc::new(MockProductRepository::default());
        let seeder = Seeder::new(repo.clone());
        seeder.seed_products().await.unwrap();

        assert_eq!(seeder.clear_products().await.unwrap(), 4);
        assert_eq!(seeder.clear_products().await.unwrap(), 0);
        assert_eq!(seeder.seed_products().await.unwrap(), SeedOutcome::Seeded(4));
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 2);

        let sofa = repo.find_active_by_sku("sf-comfort-3l-bg").await.unwrap();
        assert!(sofa.is_some());
    }

    #[tokio::test]
    async fn test_seed_failure_is_propagated() {
        let repo = Arc::new(MockProductRepository {
            fail_save: true,
            ..Default::default()
        });

        let result = Seeder::new(repo).seed_products().await;

        assert_eq!(
            result,
            Err(RepositoryError::DuplicateKey {
                entity_type: "Product",
                key: "sf-comfort-3l-bg".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_clear_failure_is_propagated() {
        let repo = Arc::new(MockProductRepository {
            fail_with: Some(RepositoryError::ConnectionFailed("connection reset".to_string())),
            ..Default::default()
        });

        let result = Seeder::new(repo).clear_products().await;

        assert_eq!(
            result,
            Err(RepositoryError::ConnectionFailed("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_count_failure_skips_insert() {
        let repo = Arc::new(MockProductRepository {
            fail_with: Some(RepositoryError::QueryFailed("no such table: products".to_string())),
            ..Default::default()
        });

        let result = Seeder::new(repo.clone()).seed_products().await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 0);
    }
}

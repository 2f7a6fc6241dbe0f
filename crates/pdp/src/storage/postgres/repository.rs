//! PostgreSQL repository implementation.
//!
//! Schema changes only ever come from the embedded migrations; this module
//! never creates or alters tables on its own.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::{ConnectOptions, FromRow, Postgres, QueryBuilder};

use pdp_core::config::PostgresDescriptor;
use pdp_core::product::{validate_new_product, NewProduct, Product};
use pdp_core::storage::{ProductRepository, RepositoryError, Result};

use super::error::map_sqlx_error;

const ENTITY: &str = "Product";

const PRODUCT_COLUMNS: &str =
    "id, name, brand, sku, price, description, image_url, created_at, updated_at, deleted_at";

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    brand: String,
    sku: String,
    price: Decimal,
    description: Option<String>,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: i64::from(row.id),
            name: row.name,
            brand: row.brand,
            sku: row.sku,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// PostgreSQL-based product repository over a connection pool.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Connects to the database named by the descriptor and, when
    /// `migrations_run` is set, applies pending migrations.
    pub async fn open(descriptor: &PostgresDescriptor) -> std::result::Result<Self, sqlx::Error> {
        let mut options = PgConnectOptions::new()
            .host(&descriptor.host)
            .port(descriptor.port)
            .username(&descriptor.username)
            .password(&descriptor.password)
            .database(&descriptor.database);
        if !descriptor.logging {
            options = options.disable_statement_logging();
        }

        let repository = Self::connect_with(options).await?;

        if descriptor.migrations_run {
            repository.run_migrations(descriptor.migrations).await?;
        }

        tracing::info!(
            host = %descriptor.host,
            port = descriptor.port,
            database = %descriptor.database,
            "Postgres store opened"
        );
        Ok(repository)
    }

    async fn connect_with(options: PgConnectOptions) -> std::result::Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    async fn run_migrations(&self, source: &str) -> std::result::Result<(), sqlx::Error> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!(
            source,
            known = MIGRATOR.iter().count(),
            "Migrations applied"
        );
        Ok(())
    }

    /// Reverts the most recently applied migration.
    ///
    /// Returns the reverted version, or `None` when nothing was applied.
    pub async fn revert_last_migration(&self) -> std::result::Result<Option<i64>, sqlx::Error> {
        let applied: Vec<i64> = sqlx::query_scalar(
            "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version DESC LIMIT 2",
        )
        .fetch_all(&self.pool)
        .await?;

        let Some(&last) = applied.first() else {
            return Ok(None);
        };
        let target = applied.get(1).copied().unwrap_or(0);

        MIGRATOR.undo(&self.pool, target).await?;
        tracing::info!(version = last, "Migration reverted");
        Ok(Some(last))
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProductRepository for PostgresRepository {
    async fn find_active_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1 AND deleted_at IS NULL"
        );

        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(row.map(Product::from))
    }

    async fn save_all(&self, products: &[NewProduct]) -> Result<Vec<Product>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }
        for product in products {
            validate_new_product(product)
                .map_err(|e| RepositoryError::InvalidData(format!("{}: {e}", product.sku)))?;
        }

        // A single multi-row INSERT either stores the whole batch or nothing.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO products (name, brand, sku, price, description, image_url) ",
        );
        builder.push_values(products, |mut row, product| {
            row.push_bind(&product.name)
                .push_bind(&product.brand)
                .push_bind(&product.sku)
                .push_bind(product.price)
                .push_bind(&product.description)
                .push_bind(&product.image_url);
        });
        builder.push(" RETURNING ");
        builder.push(PRODUCT_COLUMNS);

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count_all(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        u64::try_from(count).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pdp_core::product::sample_products;

    use super::*;

    /// Connects to `PDP_TEST_DATABASE_URL` with migrations applied.
    async fn test_repository() -> PostgresRepository {
        let url = std::env::var("PDP_TEST_DATABASE_URL")
            .expect("PDP_TEST_DATABASE_URL must point at a disposable database");
        let options = PgConnectOptions::from_str(&url).unwrap();

        let repository = PostgresRepository::connect_with(options).await.unwrap();
        repository.run_migrations("migrations").await.unwrap();
        repository
    }

    #[test]
    fn test_row_into_product() {
        let now = Utc::now();
        let row = ProductRow {
            id: 3,
            name: "Cadeira Office Pro".to_string(),
            brand: "ErgoCorp".to_string(),
            sku: "cd-office-pro-pt".to_string(),
            price: Decimal::new(45000, 2),
            description: None,
            image_url: "https://example.com/chair.jpg".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let product = Product::from(row);

        assert_eq!(product.id, 3);
        assert_eq!(product.price, Decimal::new(45000, 2));
        assert!(product.is_active());
    }

    #[test]
    fn test_migrations_are_reversible() {
        let migrations: Vec<_> = MIGRATOR.iter().collect();
        assert!(!migrations.is_empty());
        assert!(MIGRATOR.iter().any(|m| m.migration_type.is_down_migration()));
    }

    #[tokio::test]
    #[ignore = "requires PDP_TEST_DATABASE_URL"]
    async fn test_postgres_round_trip() {
        let repo = test_repository().await;
        repo.delete_all().await.unwrap();

        let saved = repo.save_all(&sample_products()).await.unwrap();
        assert_eq!(saved.len(), 4);
        assert_eq!(repo.count_all().await.unwrap(), 4);

        let found = repo
            .find_active_by_sku("sf-comfort-3l-bg")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, saved[0].id);
        assert_eq!(found.price, Decimal::new(129999, 2));

        let duplicate = repo.save_all(&sample_products()[..1]).await;
        assert_eq!(
            duplicate,
            Err(RepositoryError::DuplicateKey {
                entity_type: "Product",
                key: "sf-comfort-3l-bg".to_string(),
            })
        );

        sqlx::query("UPDATE products SET deleted_at = now() WHERE sku = $1")
            .bind("sf-comfort-3l-bg")
            .execute(&repo.pool)
            .await
            .unwrap();
        assert_eq!(repo.find_active_by_sku("sf-comfort-3l-bg").await.unwrap(), None);

        assert_eq!(repo.delete_all().await.unwrap(), 4);
        repo.ping().await.unwrap();
        repo.close().await;
    }
}

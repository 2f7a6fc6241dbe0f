//! SQLite repository implementation.
//!
//! Implements `ProductRepository` from `pdp_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use pdp_core::config::SqliteDescriptor;
use pdp_core::product::{
    render_sqlite_ddl, validate_new_product, EntitySchema, NewProduct, Product,
};
use pdp_core::storage::{ProductRepository, RepositoryError, Result};

use super::conversions::{format_datetime, format_decimal, row_to_product};
use super::error::{map_rusqlite_error, map_tokio_rusqlite_error};
use super::schema;

const ENTITY: &str = "Product";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based product repository.
pub struct SqliteRepository {
    conn: Connection,
    log_queries: bool,
}

impl SqliteRepository {
    /// Opens the database file named by the descriptor.
    ///
    /// The file is created if it doesn't exist. With `synchronize` on, the
    /// tables and indexes of every registered entity are created.
    pub async fn open(descriptor: &SqliteDescriptor) -> Result<Self> {
        let conn = Connection::open(&descriptor.path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let repository = Self {
            conn,
            log_queries: descriptor.logging,
        };

        if descriptor.synchronize {
            repository.synchronize(descriptor.entities).await?;
        }

        tracing::info!(path = %descriptor.path, "SQLite store opened");
        Ok(repository)
    }

    /// Creates a repository over a fresh in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let repository = Self {
            conn,
            log_queries: false,
        };
        repository.synchronize(pdp_core::product::ENTITIES).await?;

        Ok(repository)
    }

    /// Creates the schema of each entity if it is missing.
    async fn synchronize(&self, entities: &'static [EntitySchema]) -> Result<()> {
        for entity in entities {
            let ddl = render_sqlite_ddl(entity);
            self.log_statement(&ddl);

            self.conn
                .call(move |conn| {
                    conn.execute_batch(&ddl).map_err(wrap_err)?;
                    Ok(())
                })
                .await
                .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, entity.table))?;

            tracing::debug!(table = entity.table, "Schema synchronized");
        }
        Ok(())
    }

    /// Closes the underlying connection.
    pub async fn close(&self) -> Result<()> {
        self.conn
            .clone()
            .close()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }

    fn log_statement(&self, sql: &str) {
        if self.log_queries {
            tracing::debug!(target: "pdp::sql", sql = sql.trim(), "Executing statement");
        }
    }
}

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn find_active_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        self.log_statement(schema::SELECT_ACTIVE_PRODUCT_BY_SKU);
        let sku_param = sku.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ACTIVE_PRODUCT_BY_SKU)
                    .map_err(wrap_err)?;
                match stmt.query_row([&sku_param], row_to_product) {
                    Ok(product) => Ok(Some(product)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, sku))
    }

    async fn save_all(&self, products: &[NewProduct]) -> Result<Vec<Product>> {
        for product in products {
            validate_new_product(product)
                .map_err(|e| RepositoryError::InvalidData(format!("{}: {e}", product.sku)))?;
        }

        self.log_statement(schema::INSERT_PRODUCT);
        let products = products.to_vec();
        let now = Utc::now();

        // Statement errors are mapped inside the closure so that a unique
        // violation names the SKU that caused it.
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut saved = Vec::with_capacity(products.len());
                {
                    let mut stmt = tx.prepare(schema::INSERT_PRODUCT).map_err(wrap_err)?;
                    let created_at = format_datetime(&now);

                    for product in products {
                        let inserted = stmt.execute(rusqlite::params![
                            product.name,
                            product.brand,
                            product.sku,
                            format_decimal(&product.price),
                            product.description,
                            product.image_url,
                            created_at,
                        ]);
                        if let Err(e) = inserted {
                            return Ok(Err(map_rusqlite_error(&e, ENTITY, &product.sku)));
                        }
                        let id = tx.last_insert_rowid();
                        saved.push(product.into_product(id, now));
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(Ok(saved))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "batch"))?
    }

    async fn count_all(&self) -> Result<u64> {
        self.log_statement(schema::COUNT_PRODUCTS);

        let count: i64 = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_PRODUCTS, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "*"))?;

        u64::try_from(count).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn delete_all(&self) -> Result<u64> {
        self.log_statement(schema::DELETE_ALL_PRODUCTS);

        let affected = self
            .conn
            .call(|conn| {
                conn.execute(schema::DELETE_ALL_PRODUCTS, [])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "*"))?;

        Ok(affected as u64)
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |_| Ok(()))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}

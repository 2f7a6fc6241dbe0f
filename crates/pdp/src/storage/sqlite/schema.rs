//! SQL statements for the products table.
//!
//! The table itself is created from the entity descriptors in
//! `pdp_core::product`; see `SqliteRepository::synchronize`.

pub const SELECT_ACTIVE_PRODUCT_BY_SKU: &str = r#"
SELECT id, name, brand, sku, price, description, image_url, created_at, updated_at, deleted_at
FROM products
WHERE sku = ?1 AND deleted_at IS NULL
"#;

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, brand, sku, price, description, image_url, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
"#;

pub const COUNT_PRODUCTS: &str = "SELECT COUNT(*) FROM products";

pub const DELETE_ALL_PRODUCTS: &str = "DELETE FROM products";

pub const PING: &str = "SELECT 1";

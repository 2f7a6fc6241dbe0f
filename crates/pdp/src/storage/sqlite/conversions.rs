//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Prices are stored as canonical decimal text and timestamps as RFC 3339
//! text, so both round-trip without loss.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::Row;
use rust_decimal::Decimal;

use pdp_core::product::Product;

/// Convert a SQLite row to a Product.
///
/// Expected columns: id, name, brand, sku, price, description, image_url,
/// created_at, updated_at, deleted_at
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    let price: String = row.get(4)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    let deleted_at: Option<String> = row.get(9)?;

    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        sku: row.get(3)?,
        price: parse_decimal(4, &price)?,
        description: row.get(5)?,
        image_url: row.get(6)?,
        created_at: parse_datetime(7, &created_at)?,
        updated_at: parse_datetime(8, &updated_at)?,
        deleted_at: deleted_at
            .map(|value| parse_datetime(9, &value))
            .transpose()?,
    })
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

/// Parse a price stored as decimal text.
fn parse_decimal(column: usize, s: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(s).map_err(|e| conversion_error(column, e))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

/// Format a price for SQLite storage, always with two fractional digits.
pub fn format_decimal(price: &Decimal) -> String {
    let mut price = *price;
    price.rescale(2);
    price.to_string()
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

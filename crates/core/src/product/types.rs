use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as persisted in the store.
///
/// `deleted_at` marks a soft-deleted row. Lookups never return such rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub sku: String,
    /// Fixed-point price with two fractional digits.
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns true if the product has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A product that has not been inserted yet.
///
/// The store assigns `id` and the timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub sku: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: String,
}

impl NewProduct {
    /// Creates a new product without a description.
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        sku: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            sku: sku.into(),
            price,
            description: None,
            image_url: image_url.into(),
        }
    }

    /// Sets the description for this product.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Materializes the stored form of this product.
    ///
    /// Used by backends that assign the id and timestamps themselves.
    pub fn into_product(self, id: i64, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            sku: self.sku,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct::new(
            "Sofá 3 Lugares Comfort",
            "MóveisTop",
            "sf-comfort-3l-bg",
            Decimal::new(129999, 2),
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7",
        )
    }

    #[test]
    fn test_into_product_sets_timestamps_and_id() {
        let now = Utc::now();
        let product = sample().with_description("Bege").into_product(7, now);

        assert_eq!(product.id, 7);
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, now);
        assert_eq!(product.description.as_deref(), Some("Bege"));
        assert!(product.is_active());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = sample().into_product(1, Utc::now());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["imageUrl"], product.image_url);
        assert_eq!(json["price"], "1299.99");
        assert!(json["deletedAt"].is_null());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_soft_deleted_product_is_not_active() {
        let mut product = sample().into_product(1, Utc::now());
        product.deleted_at = Some(Utc::now());
        assert!(!product.is_active());
    }
}

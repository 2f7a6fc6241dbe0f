//! Validation rules for products and SKU request parameters.
//!
//! These are plain functions over the bounds below; the storage schema in
//! [`super::schema`] uses the same constants for its column sizes.

use rust_decimal::Decimal;

use super::error::{ProductError, SkuError};
use super::types::NewProduct;

pub const NAME_MAX_LENGTH: usize = 255;
pub const BRAND_MAX_LENGTH: usize = 255;
pub const SKU_MAX_LENGTH: usize = 100;
pub const IMAGE_URL_MAX_LENGTH: usize = 500;
/// Largest value representable by `numeric(10,2)`.
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);
pub const PRICE_SCALE: u32 = 2;

/// Validates a SKU received from a request.
///
/// A SKU is non-empty, at most 100 characters, and contains only lowercase
/// ASCII letters, digits and hyphens (`^[a-z0-9-]+$`).
///
/// # Examples
///
/// ```
/// use pdp_core::product::{validate_sku, SkuError};
///
/// assert!(validate_sku("sf-comfort-3l-bg").is_ok());
/// assert_eq!(validate_sku(""), Err(SkuError::Empty));
/// assert_eq!(validate_sku("SF-Comfort"), Err(SkuError::InvalidCharacters));
/// ```
pub fn validate_sku(sku: &str) -> Result<(), SkuError> {
    if sku.is_empty() {
        return Err(SkuError::Empty);
    }
    if sku.len() > SKU_MAX_LENGTH {
        return Err(SkuError::TooLong);
    }
    let valid = sku
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !valid {
        return Err(SkuError::InvalidCharacters);
    }
    Ok(())
}

/// Validates a product before it is inserted.
pub fn validate_new_product(product: &NewProduct) -> Result<(), ProductError> {
    check_text("name", &product.name, NAME_MAX_LENGTH)?;
    check_text("brand", &product.brand, BRAND_MAX_LENGTH)?;
    validate_sku(&product.sku)?;
    check_text("imageUrl", &product.image_url, IMAGE_URL_MAX_LENGTH)?;

    if product.price < Decimal::ZERO {
        return Err(ProductError::NegativePrice);
    }
    if product.price.normalize().scale() > PRICE_SCALE {
        return Err(ProductError::PriceScale);
    }
    if product.price > PRICE_MAX {
        return Err(ProductError::PriceTooLarge);
    }
    Ok(())
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        return Err(ProductError::EmptyField(field));
    }
    if value.chars().count() > max {
        return Err(ProductError::FieldTooLong { field, max });
    }
    Ok(())
}

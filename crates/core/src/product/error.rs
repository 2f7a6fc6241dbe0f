use thiserror::Error;

/// Errors that can occur when validating a product before insertion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product {0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Product {field} too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("Product price cannot be negative")]
    NegativePrice,
    #[error("Product price must have at most 2 decimal places")]
    PriceScale,
    #[error("Product price exceeds maximum of 99999999.99")]
    PriceTooLarge,
    #[error(transparent)]
    Sku(#[from] SkuError),
}

/// Errors produced by the SKU request validation rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkuError {
    #[error("SKU cannot be empty")]
    Empty,
    #[error("SKU too long (max 100 characters)")]
    TooLong,
    #[error("SKU must contain only lowercase letters, digits and hyphens")]
    InvalidCharacters,
}

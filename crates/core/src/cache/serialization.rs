//! Pure functions for encoding products to and from cache bytes.
//!
//! Cached values are JSON wrapped in a small envelope carrying
//! [`CACHE_SCHEMA_VERSION`]. Bump the version whenever the shape of
//! [`Product`] changes so that entries written by an older build are read
//! back as misses instead of being served with missing fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;

/// Version of the cached product layout.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Errors that can occur while encoding or decoding cached values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
    #[error("Cached value has schema version {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u32,
    product: &'a Product,
}

// The payload stays untyped until the version has been checked.
#[derive(Deserialize)]
struct Envelope {
    v: u32,
    product: serde_json::Value,
}

/// Serializes a product into a versioned cache value.
pub fn serialize_product(product: &Product) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        v: CACHE_SCHEMA_VERSION,
        product,
    };
    serde_json::to_vec(&envelope).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes a versioned cache value into a product.
///
/// Fails with [`SerializationError::VersionMismatch`] for values written
/// under a different schema version.
pub fn deserialize_product(bytes: &[u8]) -> Result<Product> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;

    if envelope.v != CACHE_SCHEMA_VERSION {
        return Err(SerializationError::VersionMismatch {
            found: envelope.v,
            expected: CACHE_SCHEMA_VERSION,
        });
    }

    serde_json::from_value(envelope.product)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

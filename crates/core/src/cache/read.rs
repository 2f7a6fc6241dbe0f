use crate::product::Product;

use super::serialization::{deserialize_product, SerializationError};
use super::CacheError;

/// Outcome of reading a product from the cache.
///
/// Callers branch only on [`CacheRead::into_product`]; the variants exist so
/// each way of not getting a value can be logged and tested separately.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheRead {
    /// A decodable value for the current schema version.
    Hit(Product),
    /// No value under the key, or it expired.
    Miss,
    /// A value was present but could not be decoded.
    Stale(SerializationError),
    /// The cache itself failed.
    Failed(CacheError),
}

impl CacheRead {
    /// Classifies the raw result of [`Cache::get`](super::Cache::get).
    pub fn classify(result: super::Result<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(Some(bytes)) => match deserialize_product(&bytes) {
                Ok(product) => CacheRead::Hit(product),
                Err(err) => CacheRead::Stale(err),
            },
            Ok(None) => CacheRead::Miss,
            Err(err) => CacheRead::Failed(err),
        }
    }

    /// Collapses every outcome other than a hit into "go to the store".
    pub fn into_product(self) -> Option<Product> {
        match self {
            CacheRead::Hit(product) => Some(product),
            CacheRead::Miss | CacheRead::Stale(_) | CacheRead::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::cache::serialize_product;
    use crate::product::NewProduct;

    fn product() -> Product {
        NewProduct::new(
            "Cadeira Office Pro",
            "ErgoCorp",
            "cd-office-pro-pt",
            Decimal::new(45000, 2),
            "https://images.unsplash.com/photo-1541558869434-2840d308329a",
        )
        .into_product(3, Utc::now())
    }

    #[test]
    fn test_hit() {
        let product = product();
        let bytes = serialize_product(&product).unwrap();

        let read = CacheRead::classify(Ok(Some(bytes)));
        assert_eq!(read, CacheRead::Hit(product.clone()));
        assert_eq!(read.into_product(), Some(product));
    }

    #[test]
    fn test_miss() {
        let read = CacheRead::classify(Ok(None));
        assert_eq!(read, CacheRead::Miss);
        assert_eq!(read.into_product(), None);
    }

    #[test]
    fn test_undecodable_value_is_not_served() {
        let read = CacheRead::classify(Ok(Some(b"not json".to_vec())));
        assert!(matches!(read, CacheRead::Stale(_)));
        assert_eq!(read.into_product(), None);
    }

    #[test]
    fn test_failure_is_not_served() {
        let read = CacheRead::classify(Err(CacheError::Unavailable("down".to_string())));
        assert!(matches!(read, CacheRead::Failed(_)));
        assert_eq!(read.into_product(), None);
    }
}

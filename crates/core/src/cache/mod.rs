mod error;
mod keys;
mod read;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{product_key, PRODUCT_KEY_PREFIX};
pub use read::CacheRead;
pub use serialization::{
    deserialize_product, serialize_product, SerializationError, CACHE_SCHEMA_VERSION,
};
pub use traits::Cache;

use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value cache with per-entry expiry.
///
/// Values are opaque bytes; encoding is the caller's concern (see
/// [`serialize_product`](super::serialize_product)).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Returns `Ok(None)` for absent and expired keys.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache. The TTL is chosen by the caller on every
    /// write; `None` keeps the entry until it is evicted.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;
}

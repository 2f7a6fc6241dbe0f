//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with per-entry TTL using tokio
//! synchronization primitives and an LRU eviction policy.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use pdp_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Expired entries are dropped when they are read. Once `max_entries` is
/// reached the least recently used entry is evicted on insert.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self {
            store: Arc::new(Mutex::new(LruCache::new(max_entries))),
        }
    }

    /// Number of entries currently held, expired ones included.
    #[cfg(test)]
    pub async fn entry_count(&self) -> usize {
        self.store.lock().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // LRU reads update recency, so even lookups need exclusive access.
        let mut store = self.store.lock().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let entry = CacheEntry::new(value.to_vec(), ttl);
        self.store.lock().await.put(key.to_string(), entry);
        Ok(())
    }
}

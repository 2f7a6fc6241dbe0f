use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use super::keys;

/// Default cache TTL in milliseconds.
pub const DEFAULT_CACHE_TTL_MS: u64 = 60_000;

/// Default maximum number of cached entries.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Resolved cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub max_entries: NonZeroUsize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            max_entries: NonZeroUsize::new(DEFAULT_CACHE_MAX_ENTRIES)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Resolves cache settings, falling back to defaults for values that are
/// missing, unparsable or zero.
pub fn resolve_cache(settings: &HashMap<String, String>) -> CacheSettings {
    let defaults = CacheSettings::default();
    let parse = |key: &str| {
        settings
            .get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
    };

    CacheSettings {
        ttl: parse(keys::CACHE_TTL)
            .map(Duration::from_millis)
            .unwrap_or(defaults.ttl),
        max_entries: parse(keys::CACHE_MAX_ENTRIES)
            .and_then(|v| NonZeroUsize::new(v as usize))
            .unwrap_or(defaults.max_entries),
    }
}

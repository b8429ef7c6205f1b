use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;

use crate::config::CacheConfig;

struct StoredEntry {
    value: Value,
    expires_at: Instant,
}

/// Fixed-capacity, fixed-expiry cache of raw search responses.
///
/// Lives as long as the owning client; a miss only costs a request.
pub struct SearchCache {
    entries: LruCache<String, StoredEntry>,
    ttl: Duration,
}

impl SearchCache {
    /// `None` when the capacity is zero, which disables caching
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|capacity| Self {
            entries: LruCache::new(capacity),
            ttl,
        })
    }

    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        Self::new(config.capacity, Duration::from_secs(config.ttl_seconds))
    }

    /// Stores a response with the configured time-to-live.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub fn put(&mut self, key: &str, value: Value) {
        let entry = StoredEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.put(key.to_string(), entry);
    }

    /// Retrieves a response if it exists and has not expired.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let fresh = match self.entries.get(key) {
            Some(entry) => Instant::now() < entry.expires_at,
            None => {
                tracing::debug!("Key not found");
                return None;
            }
        };

        if fresh {
            tracing::debug!("Key found and still fresh");
            self.entries.get(key).map(|entry| entry.value.clone())
        } else {
            tracing::debug!("Key found but expired");
            self.entries.pop(key);
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

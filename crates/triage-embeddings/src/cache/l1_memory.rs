//! L1 in-memory cache using moka.
//!
//! TinyLFU admission policy, per-entry TTL.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache. Keys are blake3 hashes, values are vectors.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    /// Create a new L1 cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    /// Number of entries currently in the cache (eventually consistent).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

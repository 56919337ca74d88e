//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! oldest-first eviction.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::tasks::Sweep;

// == Cache Store ==
/// Main cache storage with TTL support and a bounded entry count.
///
/// When full, inserting a new key evicts the entry with the oldest
/// `created_at`. Expired entries are removed lazily on read and by
/// [`CacheStore::cleanup_expired`].
#[derive(Debug)]
pub struct CacheStore<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance counters
    stats: StatsCounters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl_ms: u64,
    /// Next insertion sequence number
    next_seq: u64,
    clock: C,
}

impl<V> CacheStore<V, SystemClock> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `default_ttl_ms` - Default TTL in milliseconds for entries without explicit TTL
    pub fn new(max_size: usize, default_ttl_ms: u64) -> Self {
        Self::with_clock(max_size, default_ttl_ms, SystemClock)
    }
}

impl<V, C: Clock> CacheStore<V, C> {
    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_size: usize, default_ttl_ms: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsCounters::default(),
            max_size,
            default_ttl_ms,
            next_seq: 0,
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten and both timestamps
    /// are reset. If the key is new and the cache is at capacity, exactly one
    /// entry, the oldest by creation time, is evicted first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses default_ttl_ms if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        let key = key.into();

        if self.max_size == 0 {
            debug!(key = %key, "cache has zero capacity, dropping set");
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        let now = self.clock.now_ms();
        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.insert(key, CacheEntry::new(value, now, ttl, seq));
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. Expired entries are
    /// removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// Returns true if `key` holds a live entry. Does not touch statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Pattern ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn delete_pattern(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    // == Clear ==
    /// Removes all entries and resets statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = StatsCounters::default();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Length ==
    /// Returns the current number of entries in the cache, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.age_key())
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "evicted oldest cache entry");
        }
    }
}

impl<V, C: Clock> Sweep for CacheStore<V, C> {
    const LABEL: &'static str = "cache";

    fn sweep_expired(&mut self) -> usize {
        self.cleanup_expired()
    }
}

// == Get Or Set ==
/// Returns the cached value for `key`, computing and storing it on a miss.
///
/// The lock is released while `factory` runs, so concurrent callers may each
/// invoke their factory for the same cold key. A factory error is returned
/// unchanged and nothing is stored.
pub async fn get_or_set<V, C, F, Fut, E>(
    cache: &RwLock<CacheStore<V, C>>,
    key: &str,
    factory: F,
    ttl_ms: Option<u64>,
) -> Result<V, E>
where
    V: Clone,
    C: Clock,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    let cached = cache.write().await.get(key);
    if let Some(value) = cached {
        return Ok(value);
    }

    let value = factory().await?;
    cache.write().await.set(key, value.clone(), ttl_ms);
    Ok(value)
}

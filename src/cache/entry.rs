//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Insertion sequence number, breaks `created_at` ties during eviction
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry living `ttl_ms` past `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Creation time in Unix milliseconds
    /// * `ttl_ms` - Time to live in milliseconds
    /// * `seq` - Insertion sequence number assigned by the store
    pub fn new(value: V, now: u64, ttl_ms: u64, seq: u64) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at time `now`.
    ///
    /// The entry stays live up to and including `expires_at`; it is expired
    /// only once `now` is strictly past it.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// Eviction ordering key: oldest creation first, earliest insertion on ties.
    pub(crate) fn age_key(&self) -> (u64, u64) {
        (self.created_at, self.seq)
    }
}

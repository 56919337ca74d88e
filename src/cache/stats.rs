//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,
    /// Number of entries evicted to stay within capacity
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expirations: u64,
}

// == Counters ==
/// Running counters owned by a cache store.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatsCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl StatsCounters {
    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Snapshot ==
    /// Builds a stats snapshot for a cache currently holding `size` entries.
    pub fn snapshot(&self, size: usize) -> CacheStats {
        CacheStats {
            size,
            hits: self.hits,
            misses: self.misses,
            hit_rate: hit_rate(self.hits, self.misses),
            evictions: self.evictions,
            expirations: self.expirations,
        }
    }
}

// == Hit Rate ==
/// Calculates the hit rate percentage.
///
/// Returns 100 * hits / (hits + misses), or 0.0 if no lookups have been made.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / total as f64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = StatsCounters::default().snapshot(0);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut counters = StatsCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.snapshot(1).hit_rate, 100.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut counters = StatsCounters::default();
        counters.record_miss();
        counters.record_miss();
        assert_eq!(counters.snapshot(0).hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        assert_eq!(hit_rate(1, 1), 50.0);
        assert!((hit_rate(1, 3) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_eviction_and_expirations() {
        let mut counters = StatsCounters::default();
        counters.record_eviction();
        counters.record_eviction();
        counters.record_expirations(3);

        let stats = counters.snapshot(42);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.size, 42);
    }
}

//! Rate Limit Entry Module
//!
//! Per-key request counter for one fixed window.

use serde::Serialize;

// == Rate Limit Entry ==
/// Requests observed for a key within its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitEntry {
    /// Number of requests observed in the current window
    pub count: u32,
    /// Window end (Unix milliseconds); the count restarts after this
    pub reset_time: u64,
}

impl RateLimitEntry {
    /// Opens a fresh window of `window_ms` starting at `now`.
    pub fn fresh(now: u64, window_ms: u64) -> Self {
        Self {
            count: 0,
            reset_time: now.saturating_add(window_ms),
        }
    }

    /// A window is stale once `now` is strictly past `reset_time`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.reset_time
    }

    /// Milliseconds until the window ends, 0 once it has.
    pub fn wait_ms(&self, now: u64) -> u64 {
        self.reset_time.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry() {
        let entry = RateLimitEntry::fresh(1_000, 60_000);
        assert_eq!(entry.count, 0);
        assert_eq!(entry.reset_time, 61_000);
    }

    #[test]
    fn test_window_boundary() {
        let entry = RateLimitEntry::fresh(0, 1_000);
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_wait_ms() {
        let entry = RateLimitEntry::fresh(0, 1_000);
        assert_eq!(entry.wait_ms(250), 750);
        assert_eq!(entry.wait_ms(5_000), 0);
    }
}

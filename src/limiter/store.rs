//! Rate Limiter Module
//!
//! Fixed-window request counting per key.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ServiceError};
use crate::limiter::profile::wait_message;
use crate::limiter::{LimitConfig, LimitProfile, RateLimitEntry};
use crate::tasks::Sweep;

// == Decision ==
/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    /// Whether the request fits within the window's ceiling
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Window end (Unix milliseconds)
    pub reset_time: u64,
}

// == Rate Limiter ==
/// Per-key fixed-window rate limiter.
///
/// Every check counts the request, including rejected ones, so `count` keeps
/// growing past the ceiling while a caller ignores `allowed == false`.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    /// Window state by key
    entries: HashMap<String, RateLimitEntry>,
    /// Limit applied by `check_default`
    default_config: LimitConfig,
    clock: C,
}

impl RateLimiter<SystemClock> {
    // == Constructor ==
    /// Creates a limiter whose default is the general API profile.
    pub fn new() -> Self {
        Self::with_default(LimitProfile::GeneralApi.config())
    }

    /// Creates a limiter with a custom default limit.
    pub fn with_default(default_config: LimitConfig) -> Self {
        Self::with_clock(default_config, SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Creates a limiter reading time from `clock`.
    pub fn with_clock(default_config: LimitConfig, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            default_config,
            clock,
        }
    }

    // == Check ==
    /// Counts one request for `key` and reports whether it is allowed.
    ///
    /// A missing or stale window is replaced by a fresh one before counting.
    pub fn check(&mut self, key: &str, config: LimitConfig) -> RateLimitDecision {
        let now = self.clock.now_ms();

        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry::fresh(now, config.window_ms));
        if entry.is_expired(now) {
            *entry = RateLimitEntry::fresh(now, config.window_ms);
        }

        entry.count = entry.count.saturating_add(1);

        let decision = RateLimitDecision {
            allowed: entry.count <= config.max_requests,
            remaining: config.max_requests.saturating_sub(entry.count),
            reset_time: entry.reset_time,
        };

        if !decision.allowed {
            debug!(
                key = %key,
                count = entry.count,
                max_requests = config.max_requests,
                "rate limit exceeded"
            );
        }

        decision
    }

    /// Counts one request for `key` against the manager-wide default limit.
    pub fn check_default(&mut self, key: &str) -> RateLimitDecision {
        let config = self.default_config;
        self.check(key, config)
    }

    // == Enforce ==
    /// Checks `key` under a named profile, rejecting with a wait message.
    ///
    /// The key is scoped by profile name, so the same client has independent
    /// windows per category.
    pub fn enforce(&mut self, key: &str, profile: LimitProfile) -> Result<RateLimitDecision> {
        self.enforce_with(&profile.scoped_key(key), profile.config())
    }

    /// Like [`RateLimiter::enforce`], against the manager-wide default limit
    /// and without key scoping.
    pub fn enforce_default(&mut self, key: &str) -> Result<RateLimitDecision> {
        let config = self.default_config;
        self.enforce_with(key, config)
    }

    fn enforce_with(&mut self, key: &str, config: LimitConfig) -> Result<RateLimitDecision> {
        let decision = self.check(key, config);
        if decision.allowed {
            return Ok(decision);
        }

        let now = self.clock.now_ms();
        let wait_ms = self.entries.get(key).map_or(0, |entry| entry.wait_ms(now));
        warn!(key = %key, wait_ms, "request rejected by rate limiter");

        Err(ServiceError::RateLimited {
            message: wait_message(wait_ms),
            reset_time: decision.reset_time,
        })
    }

    // == Reset ==
    /// Drops the window for `key`. Returns whether one existed.
    pub fn reset(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Status ==
    /// Returns the raw entry for `key`, stale or not, without counting.
    pub fn status(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).copied()
    }

    // == Cleanup Expired ==
    /// Removes every entry whose window has ended.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    pub fn default_config(&self) -> LimitConfig {
        self.default_config
    }

    /// Number of tracked keys, stale or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Clock> Sweep for RateLimiter<C> {
    const LABEL: &'static str = "rate limiter";

    fn sweep_expired(&mut self) -> usize {
        self.cleanup_expired()
    }
}

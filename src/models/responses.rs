//! Response DTOs for the service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::limiter::{LimitProfile, RateLimitDecision, RateLimitEntry};

/// Response body for GET /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Confirmation body for single-key writes and deletes
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    /// Success message
    pub message: String,
    /// The key that was affected
    pub key: String,
}

impl KeyResponse {
    /// Creates a response for a stored key
    pub fn set(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }

    /// Creates a response for a removed key
    pub fn deleted(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for bulk removal (DELETE /cache/prefix/:prefix, DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache statistics snapshot
    pub cache: CacheStats,
    /// Number of keys the `/limits` rate limiter tracks
    pub rate_limit_keys: usize,
    /// Number of client windows the request middleware tracks
    pub client_windows: usize,
}

/// One row of the profile table (GET /limits/profiles)
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub name: LimitProfile,
    pub window_ms: u64,
    pub max_requests: u32,
}

impl From<LimitProfile> for ProfileResponse {
    fn from(profile: LimitProfile) -> Self {
        let config = profile.config();
        Self {
            name: profile,
            window_ms: config.window_ms,
            max_requests: config.max_requests,
        }
    }
}

/// Response body for an admitted check (POST /limits/check)
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub key: String,
    /// None when the limiter default applied
    pub profile: Option<LimitProfile>,
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: u64,
    /// `reset_time` in RFC 3339
    pub reset_at: Option<String>,
}

impl CheckResponse {
    pub fn new(
        key: impl Into<String>,
        profile: Option<LimitProfile>,
        decision: RateLimitDecision,
    ) -> Self {
        Self {
            key: key.into(),
            profile,
            allowed: decision.allowed,
            remaining: decision.remaining,
            reset_time: decision.reset_time,
            reset_at: to_rfc3339(decision.reset_time),
        }
    }
}

/// Response body for GET /limits/:key
#[derive(Debug, Clone, Serialize)]
pub struct LimitStatusResponse {
    pub key: String,
    pub count: u32,
    pub reset_time: u64,
    pub reset_at: Option<String>,
}

impl LimitStatusResponse {
    pub fn new(key: impl Into<String>, entry: RateLimitEntry) -> Self {
        Self {
            key: key.into(),
            count: entry.count,
            reset_time: entry.reset_time,
            reset_at: to_rfc3339(entry.reset_time),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn to_rfc3339(unix_ms: u64) -> Option<String> {
    let ms = i64::try_from(unix_ms).ok()?;
    chrono::DateTime::from_timestamp_millis(ms).map(|at| at.to_rfc3339())
}

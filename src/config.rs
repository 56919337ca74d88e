//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.
//! The cache and limiter themselves take their settings as constructor
//! arguments; only the binary reads the environment.

use std::env;
use std::str::FromStr;

use crate::limiter::LimitProfile;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: u64,
    /// Interval in milliseconds between cache expiry sweeps
    pub cache_sweep_interval_ms: u64,
    /// Interval in milliseconds between rate-limiter sweeps
    pub limiter_sweep_interval_ms: u64,
    /// Profile applied when a check names no limit
    pub default_profile: LimitProfile,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Cache sweep frequency (default: 60000)
    /// - `LIMITER_SWEEP_INTERVAL_MS` - Limiter sweep frequency (default: 60000)
    /// - `DEFAULT_LIMIT_PROFILE` - Default limit profile name (default: general-api)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            default_ttl_ms: env_or("CACHE_DEFAULT_TTL_MS", defaults.default_ttl_ms),
            cache_sweep_interval_ms: env_or(
                "CACHE_SWEEP_INTERVAL_MS",
                defaults.cache_sweep_interval_ms,
            ),
            limiter_sweep_interval_ms: env_or(
                "LIMITER_SWEEP_INTERVAL_MS",
                defaults.limiter_sweep_interval_ms,
            ),
            default_profile: env_or("DEFAULT_LIMIT_PROFILE", defaults.default_profile),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 1000,
            default_ttl_ms: 300_000,
            cache_sweep_interval_ms: 60_000,
            limiter_sweep_interval_ms: 60_000,
            default_profile: LimitProfile::GeneralApi,
            server_port: 3000,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.cache_sweep_interval_ms, 60_000);
        assert_eq!(config.limiter_sweep_interval_ms, 60_000);
        assert_eq!(config.default_profile, LimitProfile::GeneralApi);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_env_or_fallbacks() {
        env::remove_var("CACHE_GUARD_TEST_UNSET");
        assert_eq!(env_or("CACHE_GUARD_TEST_UNSET", 7u64), 7);

        env::set_var("CACHE_GUARD_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("CACHE_GUARD_TEST_GARBAGE", 7u64), 7);

        env::set_var("CACHE_GUARD_TEST_PROFILE", "login");
        assert_eq!(
            env_or("CACHE_GUARD_TEST_PROFILE", LimitProfile::GeneralApi),
            LimitProfile::Login
        );
    }
}

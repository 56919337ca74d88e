//! Limit Profiles
//!
//! Fixed table of named rate-limit configurations used by callers instead of
//! raw window/ceiling numbers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ServiceError;

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;

// == Limit Config ==
/// Window length and request ceiling for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitConfig {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Requests allowed within one window
    pub max_requests: u32,
}

impl LimitConfig {
    pub const fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }
}

// == Limit Profile ==
/// Named operation categories, each with its own limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitProfile {
    GeneralApi,
    Login,
    Registration,
    PasswordReset,
    Export,
    HeavyReport,
}

impl LimitProfile {
    /// Every profile, in table order.
    pub const ALL: [LimitProfile; 6] = [
        LimitProfile::GeneralApi,
        LimitProfile::Login,
        LimitProfile::Registration,
        LimitProfile::PasswordReset,
        LimitProfile::Export,
        LimitProfile::HeavyReport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LimitProfile::GeneralApi => "general-api",
            LimitProfile::Login => "login",
            LimitProfile::Registration => "registration",
            LimitProfile::PasswordReset => "password-reset",
            LimitProfile::Export => "export",
            LimitProfile::HeavyReport => "heavy-report",
        }
    }

    pub fn config(&self) -> LimitConfig {
        match self {
            LimitProfile::GeneralApi => LimitConfig::new(MINUTE_MS, 100),
            LimitProfile::Login => LimitConfig::new(15 * MINUTE_MS, 5),
            LimitProfile::Registration => LimitConfig::new(60 * MINUTE_MS, 3),
            LimitProfile::PasswordReset => LimitConfig::new(60 * MINUTE_MS, 3),
            LimitProfile::Export => LimitConfig::new(60 * MINUTE_MS, 10),
            LimitProfile::HeavyReport => LimitConfig::new(5 * MINUTE_MS, 10),
        }
    }

    /// Namespaces `key` under this profile so categories never share a window.
    pub fn scoped_key(&self, key: &str) -> String {
        format!("{}:{}", self.name(), key)
    }
}

impl fmt::Display for LimitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LimitProfile {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LimitProfile::ALL
            .into_iter()
            .find(|profile| profile.name() == s)
            .ok_or_else(|| ServiceError::UnknownProfile(s.to_string()))
    }
}

// == Wait Message ==
/// Formats the rejection message for a caller that must wait `wait_ms`.
///
/// Under a minute the wait is given in seconds, otherwise in minutes, rounded
/// up and never below 1.
pub fn wait_message(wait_ms: u64) -> String {
    if wait_ms < MINUTE_MS {
        let seconds = wait_ms.div_ceil(SECOND_MS).max(1);
        format!(
            "Too many requests. Please try again in {} {}.",
            seconds,
            plural(seconds, "second")
        )
    } else {
        let minutes = wait_ms.div_ceil(MINUTE_MS);
        format!(
            "Too many requests. Please try again in {} {}.",
            minutes,
            plural(minutes, "minute")
        )
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

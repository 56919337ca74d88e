//! Request DTOs for the service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for storing a cache entry (PUT /cache)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl_ms`: Optional TTL in milliseconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_key(&self.key) {
            return Some(msg);
        }
        if self.ttl_ms == Some(0) {
            return Some("TTL must be positive".to_string());
        }
        None
    }
}

/// Request body for a named-profile check (POST /limits/check)
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    /// Client discriminator, e.g. account id or address
    pub key: String,
    /// Profile name from the profile table; the limiter default when absent
    #[serde(default)]
    pub profile: Option<String>,
}

impl CheckRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "customers:42", "value": {"name": "Acme"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "customers:42");
        assert_eq!(req.value["name"], "Acme");
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 60000}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, Some(60_000));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            ttl_ms: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_key() {
        let req = CheckRequest {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
            profile: Some("login".to_string()),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_zero_ttl() {
        let req = SetRequest {
            key: "k".to_string(),
            value: Value::Bool(true),
            ttl_ms: Some(0),
        };
        assert_eq!(req.validate(), Some("TTL must be positive".to_string()));
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: Value::from(3),
            ttl_ms: Some(60_000),
        };
        assert!(req.validate().is_none());
    }
}

//! Error types for the cache guard service
//!
//! Provides unified error handling using thiserror. Cache misses and
//! rate-limit decisions are ordinary return values in the library; these
//! errors only surface at profile resolution, `enforce`, and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Key not found in the cache or limiter
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Limit profile name is not in the profile table
    #[error("Unknown rate limit profile: {0}")]
    UnknownProfile(String),

    /// Request rejected by the rate limiter
    #[error("{message}")]
    RateLimited {
        /// Human-readable wait message
        message: String,
        /// Unix milliseconds at which the current window ends
        reset_time: u64,
    },
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) | ServiceError::UnknownProfile(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        };

        let body = match &self {
            ServiceError::RateLimited { message, reset_time } => json!({
                "error": message,
                "reset_time": reset_time,
            }),
            other => json!({
                "error": other.to_string()
            }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (ServiceError::NotFound("key".to_string()), StatusCode::NOT_FOUND),
            (ServiceError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (ServiceError::UnknownProfile("nope".to_string()), StatusCode::BAD_REQUEST),
            (
                ServiceError::RateLimited {
                    message: "slow down".to_string(),
                    reset_time: 1,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_rate_limited_body_carries_reset_time() {
        let response = ServiceError::RateLimited {
            message: "Too many requests. Please try again in 3 seconds.".to_string(),
            reset_time: 12_345,
        }
        .into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["reset_time"], 12_345);
        assert_eq!(
            json["error"],
            "Too many requests. Please try again in 3 seconds."
        );
    }
}

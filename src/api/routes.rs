//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    check_handler, clear_handler, delete_handler, delete_prefix_handler, get_handler,
    health_handler, limit_reset_handler, limit_status_handler, profiles_handler, set_handler,
    stats_handler, AppState,
};
use super::middleware::rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Store a JSON value
/// - `DELETE /cache` - Clear the cache
/// - `GET /cache/:key` - Retrieve a value by key
/// - `DELETE /cache/:key` - Delete a key
/// - `DELETE /cache/prefix/:prefix` - Delete every key under a prefix
/// - `GET /stats` - Cache statistics and limiter size
/// - `GET /health` - Health check endpoint
/// - `GET /limits/profiles` - Named limit profiles
/// - `POST /limits/check` - Count a request under a profile
/// - `GET /limits/:key` - Raw window state for a key
/// - `DELETE /limits/:key` - Reset a key's window
///
/// # Middleware
/// - Rate limit: every request counts against the request profile
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", put(set_handler).delete(clear_handler))
        .route("/cache/:key", get(get_handler).delete(delete_handler))
        .route("/cache/prefix/:prefix", delete(delete_prefix_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/limits/profiles", get(profiles_handler))
        .route("/limits/check", post(check_handler))
        .route(
            "/limits/:key",
            get(limit_status_handler).delete(limit_reset_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::{REMAINING_HEADER, RESET_HEADER};
    use crate::cache::CacheStore;
    use crate::limiter::RateLimiter;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(CacheStore::new(100, 300_000), RateLimiter::new()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REMAINING_HEADER], "99");
        assert!(response.headers().contains_key(RESET_HEADER));
    }

    #[tokio::test]
    async fn test_profiles_route_not_shadowed_by_key_route() {
        let state = AppState::new(CacheStore::new(100, 300_000), RateLimiter::new());
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/limits/profiles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/cache")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

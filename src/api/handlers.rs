//! API Handlers
//!
//! HTTP request handlers for the cache and rate-limiter endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::limiter::{LimitProfile, RateLimiter};
use crate::models::{
    CheckRequest, CheckResponse, GetResponse, HealthResponse, KeyResponse, LimitStatusResponse,
    ProfileResponse, RemovedResponse, SetRequest, StatsResponse,
};

/// Application state shared across all handlers.
///
/// One cache and one limiter per process, each behind its own lock. The
/// per-client request windows sit in a separate limiter that no route can
/// read or reset.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache of JSON values
    pub cache: Arc<RwLock<CacheStore<Value>>>,
    /// Limiter behind the `/limits` routes
    pub limiter: Arc<RwLock<RateLimiter>>,
    /// Per-client windows counted by the request middleware
    pub request_limiter: Arc<RwLock<RateLimiter>>,
    /// Profile applied to every incoming request
    pub request_profile: LimitProfile,
}

impl AppState {
    /// Creates a new AppState from already constructed managers.
    pub fn new(cache: CacheStore<Value>, limiter: RateLimiter) -> Self {
        Self::with_request_profile(cache, limiter, LimitProfile::GeneralApi)
    }

    /// Creates a new AppState whose middleware counts requests under `profile`.
    pub fn with_request_profile(
        cache: CacheStore<Value>,
        limiter: RateLimiter,
        profile: LimitProfile,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RwLock::new(limiter)),
            request_limiter: Arc::new(RwLock::new(RateLimiter::with_default(profile.config()))),
            request_profile: profile,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::new(config.max_size, config.default_ttl_ms);
        let limiter = RateLimiter::with_default(config.default_profile.config());
        Self::with_request_profile(cache, limiter, config.default_profile)
    }
}

/// Handler for PUT /cache
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, req.ttl_ms);

    Ok(Json(KeyResponse::set(req.key)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads update statistics and may drop an expired entry
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| ServiceError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.delete(&key) {
        return Err(ServiceError::NotFound(key));
    }

    Ok(Json(KeyResponse::deleted(key)))
}

/// Handler for DELETE /cache/prefix/:prefix
pub async fn delete_prefix_handler(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Json<RemovedResponse> {
    let removed = state.cache.write().await.delete_pattern(&prefix);
    info!(prefix = %prefix, removed, "invalidated cache namespace");

    Json(RemovedResponse { removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();
    info!(removed, "cache cleared");

    Json(RemovedResponse { removed })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await.stats();
    let rate_limit_keys = state.limiter.read().await.len();
    let client_windows = state.request_limiter.read().await.len();

    Json(StatsResponse {
        cache,
        rate_limit_keys,
        client_windows,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /limits/profiles
pub async fn profiles_handler() -> Json<Vec<ProfileResponse>> {
    Json(
        LimitProfile::ALL
            .into_iter()
            .map(ProfileResponse::from)
            .collect(),
    )
}

/// Handler for POST /limits/check
///
/// Counts one request for `key` under the named profile, or under the
/// limiter's default limit when no profile is given. Answers 429 with a wait
/// message once the ceiling is passed.
pub async fn check_handler(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }
    let profile = req
        .profile
        .as_deref()
        .map(str::parse::<LimitProfile>)
        .transpose()?;

    let mut limiter = state.limiter.write().await;
    let decision = match profile {
        Some(profile) => limiter.enforce(&req.key, profile)?,
        None => limiter.enforce_default(&req.key)?,
    };

    Ok(Json(CheckResponse::new(req.key, profile, decision)))
}

/// Handler for GET /limits/:key
pub async fn limit_status_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<LimitStatusResponse>> {
    let entry = state
        .limiter
        .read()
        .await
        .status(&key)
        .ok_or_else(|| ServiceError::NotFound(key.clone()))?;

    Ok(Json(LimitStatusResponse::new(key, entry)))
}

/// Handler for DELETE /limits/:key
pub async fn limit_reset_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    if !state.limiter.write().await.reset(&key) {
        return Err(ServiceError::NotFound(key));
    }
    info!(key = %key, "rate limit window reset");

    Ok(Json(KeyResponse::deleted(key)))
}

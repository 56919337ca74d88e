//! Rate Limit Middleware
//!
//! Counts every incoming request against the configured request profile,
//! keyed by client address.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::AppState;
use crate::error::ServiceError;

/// Header carrying the requests left in the current window
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Header carrying the window end in Unix milliseconds
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rejects the request with 429 once the client exceeds the request profile;
/// otherwise forwards it. Both outcomes carry the window headers.
///
/// Windows live in `AppState::request_limiter`, which the `/limits` routes
/// never touch.
pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let client = client_key(&req);

    let decision = state
        .request_limiter
        .write()
        .await
        .enforce(&client, state.request_profile);

    match decision {
        Ok(decision) => {
            let response = next.run(req).await;
            with_window_headers(response, decision.remaining, decision.reset_time)
        }
        Err(err) => {
            let reset_time = match &err {
                ServiceError::RateLimited { reset_time, .. } => Some(*reset_time),
                _ => None,
            };
            let response = err.into_response();
            match reset_time {
                Some(reset_time) => with_window_headers(response, 0, reset_time),
                None => response,
            }
        }
    }
}

fn with_window_headers(mut response: Response, remaining: u32, reset_time: u64) -> Response {
    let headers = response.headers_mut();
    headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
    headers.insert(RESET_HEADER, HeaderValue::from(reset_time));
    response
}

/// Identifies the caller: first `x-forwarded-for` hop when it is a
/// non-loopback IP address, then the peer address, then `"anonymous"`.
fn client_key(req: &Request) -> String {
    forwarded_for(req.headers())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        })
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    let first_hop = headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim();

    // A loopback first hop can only be spoofed
    first_hop
        .parse::<IpAddr>()
        .ok()
        .filter(|ip| !ip.is_loopback())
}

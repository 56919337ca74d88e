//! API Module
//!
//! HTTP handlers, middleware and routing for the operations surface.
//!
//! # Endpoints
//! - `PUT /cache`, `DELETE /cache` - Store a value / clear the cache
//! - `GET /cache/:key`, `DELETE /cache/:key` - Read / delete a key
//! - `DELETE /cache/prefix/:prefix` - Invalidate a key namespace
//! - `GET /stats` - Cache and limiter statistics
//! - `GET /health` - Health check endpoint
//! - `GET /limits/profiles`, `POST /limits/check` - Named limit profiles
//! - `GET /limits/:key`, `DELETE /limits/:key` - Inspect / reset a window

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

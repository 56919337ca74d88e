//! Cache Guard - in-memory TTL cache and fixed-window rate limiter
//!
//! Provides a size- and time-bounded memoization layer plus per-key request
//! limiting, both process-local, with an HTTP operations surface.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;

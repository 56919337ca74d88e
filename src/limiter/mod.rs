//! Rate Limiter Module
//!
//! Bounds how many operations of a category a key may perform per window.
//! Windows are fixed per key: they open on the first check after the
//! previous one ended.

mod entry;
mod profile;
mod store;

#[cfg(test)]
mod property_tests;

pub use entry::RateLimitEntry;
pub use profile::{wait_message, LimitConfig, LimitProfile};
pub use store::{RateLimitDecision, RateLimiter};

//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and oldest-first eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{hit_rate, CacheStats};
pub use store::{get_or_set, CacheStore};

// == Public Constants ==
/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

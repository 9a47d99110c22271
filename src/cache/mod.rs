//! Cache Module
//!
//! The disposable cache layer in front of the person table: a backend trait,
//! an in-process TTL cache and a Redis-backed cache.

mod entry;
mod memory;
mod redis_cache;
mod stats;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Expiry applied to every cache write unless configured otherwise
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10);

/// Convenience Result type for cache backends.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// A key/value cache holding serialized records with an expiry.
///
/// Implementations may lose data at any time; callers must treat every
/// error and every miss as "ask the authoritative store".
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the cached value, or `None` on miss or expiry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value, replacing any existing entry and resetting its TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}

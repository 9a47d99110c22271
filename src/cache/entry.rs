//! Cache Entry Module
//!
//! A serialized record together with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized record
    pub value: String,
    /// Instant at which the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so a
    /// zero TTL produces an entry that is never served.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

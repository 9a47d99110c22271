//! Person Store Module
//!
//! The cache-aside record store: reads go through the cache, writes go to the
//! authoritative table and then invalidate the cache entry.

mod person_store;

pub use person_store::{CachedPersonStore, DEFAULT_BACKEND_TIMEOUT};

//! Hybrid Store - person records behind a cache-aside layer
//!
//! Provides a CRUD HTTP service whose reads go through a TTL cache in front
//! of an authoritative SQL table, plus a JSON-file employee roster.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod roster;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::CachedPersonStore;
pub use tasks::spawn_cleanup_task;

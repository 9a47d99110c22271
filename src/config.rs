//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// sqlx SQLite connection URL for the person table
    pub database_url: String,
    /// Redis URL; the in-process cache is used when unset
    pub redis_url: Option<String>,
    /// TTL in seconds applied to every cache write
    pub cache_ttl: u64,
    /// Per-call timeout for the store and cache, in milliseconds
    pub backend_timeout_ms: u64,
    /// In-process cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_URL` - SQLite URL (default: `sqlite://persons.db`)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process cache)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 10)
    /// - `BACKEND_TIMEOUT_MS` - Backend call timeout (default: 2000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            backend_timeout_ms: parse_var("BACKEND_TIMEOUT_MS")
                .unwrap_or(defaults.backend_timeout_ms),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }
}

/// Unset or unparsable variables fall back to the default.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_url: "sqlite://persons.db".to_string(),
            redis_url: None,
            cache_ttl: 10,
            backend_timeout_ms: 2000,
            cleanup_interval: 1,
        }
    }
}

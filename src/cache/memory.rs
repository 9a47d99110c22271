//! In-Process Cache Module
//!
//! HashMap-backed cache with per-entry TTL, used when no Redis server is
//! configured and throughout the test suite.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry, CacheResult, CacheStats};

// == Entry Table ==
/// Entries plus counters, guarded together by one lock.
#[derive(Debug, Default)]
struct EntryTable {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl EntryTable {
    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Expired entries are removed on access and counted as misses.
    fn get(&mut self, key: &str) -> Option<String> {
        let hit = match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expired(1);
                self.stats.set_total_entries(self.entries.len());
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        };

        match hit {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        hit
    }

    fn delete(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.stats.set_total_entries(self.entries.len());
        }
    }

    fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }
}

// == Memory Cache ==
/// Shared in-process cache. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    table: Arc<RwLock<EntryTable>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        self.table.write().await.cleanup_expired()
    }

    // == Flush ==
    /// Drops every entry. Counters are kept.
    pub async fn flush(&self) {
        let mut table = self.table.write().await;
        table.entries.clear();
        table.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub async fn stats(&self) -> CacheStats {
        self.table.read().await.stats.clone()
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.table.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        // Write lock: expired entries are removed and stats updated on read
        Ok(self.table.write().await.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.table.write().await.set(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.table.write().await.delete(key);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_cache_new() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", TTL).await.unwrap();
        let value = cache.get("1").await.unwrap();

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_get_nonexistent() {
        let cache = MemoryCache::new();
        assert!(cache.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cache_delete() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", TTL).await.unwrap();
        cache.delete("1").await.unwrap();

        assert!(cache.is_empty().await);
        assert!(cache.get("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cache_delete_nonexistent_is_ok() {
        let cache = MemoryCache::new();
        assert!(cache.delete("nonexistent").await.is_ok());
    }

    #[tokio::test]
    async fn test_cache_overwrite() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", TTL).await.unwrap();
        cache.set("1", "value2", TTL).await.unwrap();

        assert_eq!(cache.get("1").await.unwrap().as_deref(), Some("value2"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_ttl_expiration() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", Duration::from_millis(50)).await.unwrap();
        assert!(cache.get("1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(cache.get("1").await.unwrap().is_none());
        assert_eq!(cache.stats().await.expired, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", TTL).await.unwrap();
        cache.get("1").await.unwrap(); // hit
        cache.get("2").await.unwrap(); // miss

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_cache_cleanup_expired() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", Duration::from_millis(50)).await.unwrap();
        cache.set("2", "value2", Duration::from_secs(10)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(cache.cleanup_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cache_flush_keeps_counters() {
        let cache = MemoryCache::new();

        cache.set("1", "value1", TTL).await.unwrap();
        cache.get("1").await.unwrap();
        cache.flush().await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.hits, 1);
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();

        cache.set("1", "value1", TTL).await.unwrap();
        assert_eq!(other.get("1").await.unwrap().as_deref(), Some("value1"));
    }
}

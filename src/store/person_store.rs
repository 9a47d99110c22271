//! Cache-Aside Person Store
//!
//! Combines the authoritative [`PersonRepository`] with a [`CacheBackend`].
//!
//! # Consistency rules
//! - Create writes the table only; the cache is populated lazily on read.
//! - Read serves a cached value verbatim when present, otherwise loads the
//!   row, caches its JSON and returns it.
//! - Update and Delete touch the cache only after the table reports an
//!   affected row, and both remove the entry. The next read repopulates it
//!   from the table, so concurrent writers cannot leave an older copy behind.
//! - Cache failures are logged and swallowed. A failed lookup reads as a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheBackend, CacheResult, DEFAULT_CACHE_TTL};
use crate::db::PersonRepository;
use crate::error::{CacheError, Result, StoreError};
use crate::models::Person;

/// Upper bound on any single backend call unless configured otherwise
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(2);

// == Cached Person Store ==
/// Cache-aside CRUD over person records.
///
/// Holds only shared handles; all mutual exclusion is left to the backends.
#[derive(Clone)]
pub struct CachedPersonStore {
    repo: Arc<dyn PersonRepository>,
    cache: Arc<dyn CacheBackend>,
    cache_ttl: Duration,
    backend_timeout: Duration,
}

impl CachedPersonStore {
    /// Creates a store with the default TTL and backend timeout.
    pub fn new(repo: Arc<dyn PersonRepository>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            repo,
            cache,
            cache_ttl: DEFAULT_CACHE_TTL,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    /// Sets the expiry applied to every cache write.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the per-call timeout for both backends.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    // == Create ==
    /// Validates and inserts a person, returning it with its assigned id.
    ///
    /// Any `id` on the input is ignored.
    pub async fn create(&self, person: Person) -> Result<Person> {
        person.validate()?;

        let id = self
            .store_call(
                "insert",
                self.repo.insert(&person.name, person.age, &person.email),
            )
            .await?;

        info!("Created person {}", id);
        Ok(person.with_id(id))
    }

    // == Read ==
    /// Returns the person's JSON, from the cache when possible.
    ///
    /// A cache hit is returned as stored, without checking the table.
    pub async fn read(&self, id: i64) -> Result<String> {
        let key = cache_key(id);

        if let Some(cached) = self.cache_lookup(&key).await {
            debug!("Cache hit for person {}", id);
            return Ok(cached);
        }
        debug!("Cache miss for person {}, querying store", id);

        let person = self
            .store_call("select", self.repo.select_by_id(id))
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let json = serde_json::to_string(&person)?;
        if let Err(err) = self.cache_call(self.cache.set(&key, &json, self.cache_ttl)).await {
            warn!("Failed to populate cache for person {}: {}", id, err);
        }
        Ok(json)
    }

    /// Like [`read`](Self::read), decoded into a [`Person`].
    pub async fn read_person(&self, id: i64) -> Result<Person> {
        let json = self.read(id).await?;
        Ok(serde_json::from_str(&json)?)
    }

    // == Update ==
    /// Validates and overwrites the person with `id`, then drops its cache
    /// entry.
    ///
    /// The `id` argument wins over any id carried by `person`.
    pub async fn update(&self, id: i64, person: Person) -> Result<Person> {
        person.validate()?;
        let person = person.with_id(id);

        let rows = self
            .store_call(
                "update",
                self.repo
                    .update_by_id(id, &person.name, person.age, &person.email),
            )
            .await?;
        if rows == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.cache_invalidate(&cache_key(id)).await;

        info!("Updated person {}", id);
        Ok(person)
    }

    // == Delete ==
    /// Deletes the person with `id`, then drops its cache entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let rows = self
            .store_call("delete", self.repo.delete_by_id(id))
            .await?;
        if rows == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.cache_invalidate(&cache_key(id)).await;

        info!("Deleted person {}", id);
        Ok(())
    }

    // == Backend Helpers ==
    async fn store_call<T>(&self, op: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.backend_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Backend(format!(
                "store {} timed out after {:?}",
                op, self.backend_timeout
            ))),
        }
    }

    async fn cache_call<T>(&self, call: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.backend_timeout, call)
            .await
            .unwrap_or(Err(CacheError::Timeout))
    }

    /// Cache errors read as misses.
    async fn cache_lookup(&self, key: &str) -> Option<String> {
        match self.cache_call(self.cache.get(key)).await {
            Ok(value) => value,
            Err(err) => {
                warn!("Cache lookup for key {} failed, using store: {}", key, err);
                None
            }
        }
    }

    async fn cache_invalidate(&self, key: &str) {
        if let Err(err) = self.cache_call(self.cache.delete(key)).await {
            warn!(
                "Cache invalidation for key {} failed, entry may be stale until it expires: {}",
                key, err
            );
        }
    }
}

/// Cache key of a person: the decimal id.
fn cache_key(id: i64) -> String {
    id.to_string()
}

//! In-memory cache implementation with LRU eviction.
//!
//! Expired entries are treated as absent on read and dropped lazily.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use mediashelf_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Cloning is cheap and every clone shares the same store, so one instance
/// can back all catalogs of a process.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` keys.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            store.pop(key);
            tracing::trace!(key, "Dropped expired cache entry");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut store = self.store.write().await;
        let dropped = store.len();
        store.clear();
        tracing::debug!(dropped, "Memory cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("movies", b"[]", None).await.unwrap();
        let result = cache.get("movies").await.unwrap();

        assert_eq!(result, Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        assert_eq!(cache.get("shows").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("genres", b"old", None).await.unwrap();
        cache.set("genres", b"new", None).await.unwrap();

        assert_eq!(cache.get("genres").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(cache.store.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_empty_cache_is_ok() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("games", b"[]", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(cache.get("games").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get("games").await.unwrap().is_none());
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("movies", b"1", None).await.unwrap();
        cache.set("shows", b"2", None).await.unwrap();
        cache.clear().await.unwrap();

        assert!(cache.get("movies").await.unwrap().is_none());
        assert!(cache.get("shows").await.unwrap().is_none());
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let other = cache.clone();

        cache.set("pictures", b"[]", None).await.unwrap();

        assert_eq!(other.get("pictures").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(2);

        cache.set("movies", b"1", None).await.unwrap();
        cache.set("shows", b"2", None).await.unwrap();
        // Touch movies so shows becomes least recently used.
        cache.get("movies").await.unwrap();
        cache.set("music", b"3", None).await.unwrap();

        assert!(cache.get("movies").await.unwrap().is_some());
        assert!(cache.get("shows").await.unwrap().is_none());
        assert!(cache.get("music").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_holds_one_entry() {
        let cache = MemoryCache::new(0);

        cache.set("movies", b"1", None).await.unwrap();
        cache.set("shows", b"2", None).await.unwrap();

        assert_eq!(cache.store.read().await.len(), 1);
        assert!(cache.get("shows").await.unwrap().is_some());
    }
}

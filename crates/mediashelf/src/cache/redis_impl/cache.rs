//! Redis cache implementation.
//!
//! Every key written through this cache is recorded in a tracking set
//! (`{prefix}:_keys`), so `clear` removes exactly this cache's keys without
//! SCAN or FLUSHDB. The value write and the tracking write are separate
//! commands; a stale member in the tracking set only makes `clear` delete a
//! key that is already gone.
//!
//! `clear` removes only the members it read, so a key written by another
//! catalog while a clear is running stays tracked for the next one.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use mediashelf_core::cache::{namespaced_key, tracking_key, Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
    prefix: String,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `prefix` - Namespace prepended to every key
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn full_key(&self, key: &str) -> String {
        namespaced_key(&self.prefix, key)
    }

    async fn tracked_keys(&self) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.smembers(tracking_key(&self.prefix))
            .await
            .map_err(map_redis_error)
    }

    /// Deletes `keys` and removes exactly those members from the tracking set
    /// in one MULTI/EXEC.
    async fn drop_tracked(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .del(keys)
            .ignore()
            .srem(tracking_key(&self.prefix), keys)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn
            .get(self.full_key(key))
            .await
            .map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        let full_key = self.full_key(key);

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(&full_key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(&full_key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        conn.sadd::<_, _, ()>(tracking_key(&self.prefix), &full_key)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let tracked_keys = self.tracked_keys().await?;
        self.drop_tracked(&tracked_keys).await?;

        tracing::debug!(prefix = %self.prefix, dropped = tracked_keys.len(), "Redis cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Each test gets its own prefix so parallel runs never share keys.
    fn unique_prefix() -> String {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!(
            "test:mediashelf:{}:{}:{}",
            std::process::id(),
            nanos,
            COUNTER.fetch_add(1, Ordering::SeqCst)
        )
    }

    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url(), unique_prefix()).await.ok()
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        cache.set("movies", b"[]", None).await.unwrap();
        assert_eq!(cache.get("movies").await.unwrap(), Some(b"[]".to_vec()));

        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        assert_eq!(cache.get("shows").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        cache
            .set("games", b"[]", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get("games").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get("games").await.unwrap().is_none());
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_clear_only_touches_own_prefix() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };
        let Some(neighbour) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        cache.set("movies", b"1", None).await.unwrap();
        cache.set("genres", b"2", None).await.unwrap();
        neighbour.set("movies", b"3", None).await.unwrap();

        cache.clear().await.unwrap();

        assert!(cache.get("movies").await.unwrap().is_none());
        assert!(cache.get("genres").await.unwrap().is_none());
        assert_eq!(neighbour.get("movies").await.unwrap(), Some(b"3".to_vec()));

        neighbour.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_key_written_during_clear_stays_tracked() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        cache.set("genres", b"1", None).await.unwrap();
        let snapshot = cache.tracked_keys().await.unwrap();

        // Another catalog writes between the read of the tracking set and
        // the delete.
        cache.set("movies", b"2", None).await.unwrap();
        cache.drop_tracked(&snapshot).await.unwrap();

        assert!(cache.get("genres").await.unwrap().is_none());
        assert_eq!(cache.get("movies").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(
            cache.tracked_keys().await.unwrap(),
            vec![namespaced_key(&cache.prefix, "movies")]
        );

        cache.clear().await.unwrap();
        assert!(cache.get("movies").await.unwrap().is_none());
        assert!(cache.tracked_keys().await.unwrap().is_empty());
    }
}

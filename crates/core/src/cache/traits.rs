use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Look-aside key/value cache.
///
/// Values are opaque bytes; callers own the encoding.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Removes every value this cache holds.
    async fn clear(&self) -> Result<()>;
}

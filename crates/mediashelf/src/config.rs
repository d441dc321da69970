use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 0)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 64)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "mediashelf.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Namespace for every Redis key (default: "mediashelf")
    #[allow(dead_code)]
    pub redis_key_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 0, no expiry)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 64)
    /// - `SQLITE_PATH` - SQLite database path (default: "mediashelf.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `REDIS_KEY_PREFIX` - Redis key namespace (default: "mediashelf")
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "mediashelf.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            redis_key_prefix: lookup("REDIS_KEY_PREFIX")
                .unwrap_or_else(|| "mediashelf".to_string()),
        }
    }

    /// Get cache TTL as a Duration, or `None` when entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

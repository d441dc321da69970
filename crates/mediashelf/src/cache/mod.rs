//! Cache backend implementations.
//!
//! Concrete implementations of `mediashelf_core::cache::Cache`, selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process LRU cache
//! - `redis`: Redis cache shared between processes
//!
//! These features are mutually exclusive.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p mediashelf --no-default-features --features sqlite,redis"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;

/// The cache backend compiled into this binary.
#[cfg(feature = "memory")]
pub type ActiveCache = MemoryCache;

/// The cache backend compiled into this binary.
#[cfg(feature = "redis")]
pub type ActiveCache = RedisCache;

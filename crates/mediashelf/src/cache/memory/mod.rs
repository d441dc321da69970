//! In-memory cache backend.
//!
//! LRU-bounded, TTL-aware, and private to one process.

mod cache;

pub use cache::MemoryCache;

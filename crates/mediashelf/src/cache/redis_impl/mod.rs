//! Redis cache backend.
//!
//! Shares cached lists between processes. Every key lives under a
//! configurable prefix so several deployments can use one Redis server.

mod cache;
mod error;

pub use cache::RedisCache;

//! In-memory storage backend for testing.
//!
//! Keeps every entity in a `BTreeMap` behind `Arc<RwLock<_>>`. Nothing is
//! persisted; data is lost when the last clone is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediashelf::storage::inmemory::InMemoryRepository;
//! use mediashelf_core::media::Genre;
//!
//! let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;

//! Storage backend implementations.
//!
//! Concrete implementations of `mediashelf_core::storage::Repository`,
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: Non-persistent storage for tests and demos
//!
//! These features are mutually exclusive.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p mediashelf
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p mediashelf --no-default-features --features inmemory,memory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p mediashelf --features sqlite"
);

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

/// The repository backend compiled into this binary.
#[cfg(feature = "sqlite")]
pub type Store<T> = SqliteRepository<T>;

/// The repository backend compiled into this binary.
#[cfg(feature = "inmemory")]
pub type Store<T> = InMemoryRepository<T>;

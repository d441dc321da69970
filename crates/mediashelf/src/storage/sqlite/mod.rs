//! SQLite storage backend implementation.
//!
//! Every catalog type shares one `catalog_entries` table, partitioned by a
//! `kind` column. An aggregate is stored as one JSON document, so its owned
//! children are written and deleted together with the root row. `rusqlite`
//! does the work; `tokio-rusqlite` moves it off the async runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::{open_connection, open_in_memory, SqliteRepository};

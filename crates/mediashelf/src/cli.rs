//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Manage ordered media catalogs.
#[derive(Debug, Parser)]
#[command(name = "mediashelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON output.
    Json,
    /// Indented JSON output.
    #[default]
    Pretty,
}

/// One subcommand per catalog.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Movie catalog.
    Movies(CatalogCommand),
    /// TV show catalog.
    Shows(CatalogCommand),
    /// Music album catalog.
    Music(CatalogCommand),
    /// Game catalog.
    Games(CatalogCommand),
    /// Program catalog.
    Programs(CatalogCommand),
    /// Genre catalog.
    Genres(CatalogCommand),
    /// Picture catalog.
    Pictures(CatalogCommand),
}

#[derive(Debug, Parser)]
pub struct CatalogCommand {
    #[command(subcommand)]
    pub action: CatalogAction,
}

/// Actions available on every catalog.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CatalogAction {
    /// List all entities in order.
    List,
    /// Get entity by ID.
    Get {
        /// Entity ID.
        id: i64,
    },
    /// Append a new entity.
    Add {
        /// Entity as JSON; omitted fields take their defaults.
        json: String,
    },
    /// Replace a stored entity.
    Update {
        /// Entity as JSON, including its `id`.
        json: String,
    },
    /// Remove entity by ID.
    Remove {
        /// Entity ID.
        id: i64,
    },
    /// Append a copy of an entity and everything it owns.
    Duplicate {
        /// Entity ID.
        id: i64,
    },
    /// Swap an entity with the one before it.
    MoveUp {
        /// Entity ID.
        id: i64,
    },
    /// Swap an entity with the one after it.
    MoveDown {
        /// Entity ID.
        id: i64,
    },
    /// Renumber positions to `0..n` in current order.
    Compact,
    /// Delete every entity of this catalog and clear the cache.
    Reset,
}

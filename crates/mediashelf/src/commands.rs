//! Runs one CLI action against one catalog.

use anyhow::{anyhow, Context};
use serde_json::json;

use mediashelf_core::cache::Cache;
use mediashelf_core::catalog::{Entity, OrderedCatalog};
use mediashelf_core::storage::Repository;

use crate::cli::{CatalogAction, Commands, OutputFormat};
use crate::output::format_output;
use crate::state::Catalogs;

/// Dispatches a parsed command to its catalog and returns the rendered output.
pub async fn execute(
    catalogs: &Catalogs,
    command: Commands,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match command {
        Commands::Movies(cmd) => run(&catalogs.movies, cmd.action, format).await,
        Commands::Shows(cmd) => run(&catalogs.shows, cmd.action, format).await,
        Commands::Music(cmd) => run(&catalogs.music, cmd.action, format).await,
        Commands::Games(cmd) => run(&catalogs.games, cmd.action, format).await,
        Commands::Programs(cmd) => run(&catalogs.programs, cmd.action, format).await,
        Commands::Genres(cmd) => run(&catalogs.genres, cmd.action, format).await,
        Commands::Pictures(cmd) => run(&catalogs.pictures, cmd.action, format).await,
    }
}

/// Runs one action on a catalog of any entity type.
pub async fn run<T, R, C>(
    catalog: &OrderedCatalog<T, R, C>,
    action: CatalogAction,
    format: OutputFormat,
) -> anyhow::Result<String>
where
    T: Entity,
    R: Repository<T>,
    C: Cache,
{
    let output = match action {
        CatalogAction::List => format_output(&catalog.get_all().await?, format),
        CatalogAction::Get { id } => format_output(&lookup(catalog, id).await?, format),
        CatalogAction::Add { json } => {
            let entity: T = parse_entity(&json)?;
            format_output(&catalog.add(&entity).await?, format)
        }
        CatalogAction::Update { json } => {
            let entity: T = parse_entity(&json)?;
            format_output(&catalog.update(&entity).await?, format)
        }
        CatalogAction::Remove { id } => {
            let entity = lookup(catalog, id).await?;
            catalog.remove(&entity).await?;
            format_output(&json!({ "removed": id }), format)
        }
        CatalogAction::Duplicate { id } => {
            let entity = lookup(catalog, id).await?;
            format_output(&catalog.duplicate(&entity).await?, format)
        }
        CatalogAction::MoveUp { id } => {
            let entity = lookup(catalog, id).await?;
            catalog.move_up(&entity).await?;
            format_output(&catalog.get_all().await?, format)
        }
        CatalogAction::MoveDown { id } => {
            let entity = lookup(catalog, id).await?;
            catalog.move_down(&entity).await?;
            format_output(&catalog.get_all().await?, format)
        }
        CatalogAction::Compact => {
            catalog.update_positions().await?;
            format_output(&catalog.get_all().await?, format)
        }
        CatalogAction::Reset => {
            catalog.new_data().await?;
            format_output(&json!({ "reset": catalog.key() }), format)
        }
    };

    Ok(output)
}

async fn lookup<T, R, C>(catalog: &OrderedCatalog<T, R, C>, id: i64) -> anyhow::Result<T>
where
    T: Entity,
    R: Repository<T>,
    C: Cache,
{
    catalog
        .get(id)
        .await?
        .ok_or_else(|| anyhow!("{} {} not found", T::KIND, id))
}

fn parse_entity<T: Entity>(json: &str) -> anyhow::Result<T> {
    serde_json::from_str(json).with_context(|| format!("invalid {} JSON", T::KIND))
}

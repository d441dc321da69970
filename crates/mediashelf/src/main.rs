mod cache;
mod cli;
mod commands;
mod config;
mod output;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{cli::Cli, config::Config, state::Catalogs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediashelf=info,mediashelf_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let catalogs = Catalogs::from_config(&config).await?;
    let output = commands::execute(&catalogs, cli.command, cli.format).await?;

    println!("{output}");
    Ok(())
}

//! Crossword - unified CLI
//!
//! Import puzzles, list them, and play them in the terminal.

#![warn(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossword::{
    Cli, Command, CrosswordConfig, PuzzleRepository, PuzzleStore, import_file, run_tui,
};
use crossword_core::{format_clock, format_list};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CrosswordConfig::from_file(&cli.config)
        .context("Failed to load configuration")?
        .with_db_path(cli.db_path.clone());

    match cli.command {
        Command::Import { file } => {
            init_tracing();
            let store = open_store(&config)?;
            let record = import_file(store.as_ref(), &file).await?;
            println!("Imported puzzle {} ({})", record.id(), record.publication_date());
            Ok(())
        }
        Command::List => {
            init_tracing();
            let store = open_store(&config)?;
            list_puzzles(store.as_ref()).await
        }
        Command::Play { id } => {
            let store = open_store(&config)?;
            run_tui(&config, store, &id).await
        }
    }
}

/// Logs to stderr for the non-interactive commands.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,crossword=debug")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the SQLite store, creating and migrating it if needed.
#[instrument(skip(config), fields(db_path = %config.db_path()))]
fn open_store(config: &CrosswordConfig) -> Result<Arc<dyn PuzzleStore>> {
    let repo = PuzzleRepository::open(config.db_path().clone())
        .with_context(|| format!("Puzzle store unavailable at {}", config.db_path()))?;
    info!("Puzzle store open");
    Ok(Arc::new(repo))
}

/// Prints stored puzzles, newest first.
async fn list_puzzles(store: &dyn PuzzleStore) -> Result<()> {
    let listings = store.list_puzzles().await?;
    if listings.is_empty() {
        println!("No puzzles stored. Import one with `crossword import <file>`.");
        return Ok(());
    }

    for listing in listings {
        let solved = listing
            .solved_ms()
            .map(|ms| format!("solved in {}", format_clock(Duration::from_millis(ms))))
            .unwrap_or_else(|| "unsolved".to_string());
        println!(
            "{:<12} {:<12} {:<30} {}",
            listing.id(),
            listing.publication_date(),
            format_list(listing.constructors()),
            solved
        );
    }
    Ok(())
}

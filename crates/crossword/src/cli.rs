//! Command-line interface for crossword.

use clap::{Parser, Subcommand};

/// Crossword - terminal crossword player
#[derive(Parser, Debug)]
#[command(name = "crossword")]
#[command(about = "Solve crosswords in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it doesn't exist)
    #[arg(long, global = true, default_value = "crossword.toml")]
    pub config: std::path::PathBuf,

    /// Database file, overriding the config file
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a puzzle from a JSON file
    Import {
        /// Puzzle file to import
        file: std::path::PathBuf,
    },

    /// List stored puzzles
    List,

    /// Play a puzzle in the terminal UI
    Play {
        /// Puzzle id
        id: String,
    },
}

//! Crossword - terminal crossword player
//!
//! Stores puzzles and scores in SQLite and plays them in a ratatui
//! interface, driving the state machine from [`crossword_core`].
//!
//! # Architecture
//!
//! - **Store**: [`PuzzleStore`] gateway with SQLite and in-memory backends
//! - **Import**: JSON puzzle files validated before they are stored
//! - **Session**: one play-through; score writes run in the background
//! - **TUI**: key and mouse input mapped to actions, rendered from notifications
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crossword::{GameSession, PuzzleRepository, PuzzleStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store: Arc<dyn PuzzleStore> = Arc::new(PuzzleRepository::open("crossword.db".to_string())?);
//! let session = GameSession::load(store, "20230101", "shares").await?;
//! println!("Loaded {} in phase {}", session.id(), session.game().phase());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod db;
mod import;
mod session;
mod store;
mod tui;

// Crate-level exports - Command line and configuration
pub use cli::{Cli, Command};
pub use config::{ConfigError, CrosswordConfig};

// Crate-level exports - Persistence
pub use db::{DbError, NewPuzzle, NewScore, PuzzleRepository, PuzzleRow, ScoreRow};
pub use store::{MemoryStore, PuzzleListing, PuzzleStore, StoreError, StoreErrorKind};

// Crate-level exports - Import and play
pub use import::{ImportError, import_file, parse_record};
pub use session::{GameSession, LoadError, SessionEvent};
pub use tui::run_tui;

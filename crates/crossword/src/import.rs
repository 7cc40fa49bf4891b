//! Puzzle import from JSON files.
//!
//! A record is validated exactly the way it will be loaded for play, so a
//! puzzle that imports cleanly always loads.

use std::path::Path;

use crossword_core::{PuzzleError, PuzzleRecord, PuzzleSetup};
use tracing::{info, instrument, warn};

use crate::store::{PuzzleStore, StoreError};

/// Why a puzzle file was not imported.
#[derive(Debug, derive_more::Display)]
pub enum ImportError {
    /// The file could not be read.
    #[display("Failed to read {}: {}", path, reason)]
    Read {
        /// File path.
        path: String,
        /// I/O failure.
        reason: String,
    },

    /// The file is not a puzzle record.
    #[display("Not a puzzle record: {}", _0)]
    Parse(String),

    /// The record parsed but its board is malformed.
    #[display("Malformed puzzle: {}", _0)]
    Invalid(PuzzleError),

    /// The store rejected the record.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for ImportError {}

impl From<PuzzleError> for ImportError {
    fn from(err: PuzzleError) -> Self {
        ImportError::Invalid(err)
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::Store(err)
    }
}

/// Parses and validates a puzzle document.
///
/// Numeric ids become strings and only the first board body is kept.
///
/// # Errors
///
/// Returns [`ImportError::Parse`] for invalid JSON and
/// [`ImportError::Invalid`] for a board that would not load.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_record(json: &str) -> Result<PuzzleRecord, ImportError> {
    let record: PuzzleRecord =
        serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))?;

    let bodies = record.body().len();
    if bodies > 1 {
        warn!(id = %record.id(), bodies, "Dropping extra board bodies");
    }
    let record = record.into_primary();

    PuzzleSetup::load(&record)?;
    Ok(record)
}

/// Reads, validates and stores a puzzle file.
///
/// Importing the same id again replaces the stored puzzle.
///
/// # Errors
///
/// Returns [`ImportError`] if any step fails; nothing is stored in that case.
#[instrument(skip(store), fields(path = %path.display()))]
pub async fn import_file(store: &dyn PuzzleStore, path: &Path) -> Result<PuzzleRecord, ImportError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ImportError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let record = parse_record(&json)?;
    store.put_puzzle(record.clone()).await?;

    info!(id = %record.id(), date = %record.publication_date(), "Puzzle imported");
    Ok(record)
}

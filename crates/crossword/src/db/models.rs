//! Database rows for puzzles and scores.

use chrono::NaiveDateTime;
use crossword_core::{PuzzleRecord, ScoreRecord};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Stored puzzle row. The full record is kept as JSON.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::puzzles)]
pub struct PuzzleRow {
    id: String,
    publication_date: String,
    record: String,
    imported_at: NaiveDateTime,
}

impl PuzzleRow {
    /// Decodes the stored JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored body no longer parses.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn parse_record(&self) -> Result<PuzzleRecord, DbError> {
        serde_json::from_str(&self.record)
            .map_err(|e| DbError::new(format!("Corrupt record for puzzle '{}': {}", self.id, e)))
    }
}

/// Insertable puzzle row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::puzzles)]
pub struct NewPuzzle {
    id: String,
    publication_date: String,
    record: String,
}

impl NewPuzzle {
    /// Serializes a record into a row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the record cannot be encoded.
    #[instrument(skip(record), fields(id = %record.id()))]
    pub fn from_record(record: &PuzzleRecord) -> Result<Self, DbError> {
        let json = serde_json::to_string(record)
            .map_err(|e| DbError::new(format!("Failed to encode puzzle '{}': {}", record.id(), e)))?;
        Ok(Self::new(
            record.id().clone(),
            record.publication_date().clone(),
            json,
        ))
    }
}

/// Stored score row, one per puzzle.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct ScoreRow {
    puzzle_id: String,
    duration_ms: i64,
    solved_at: i64,
}

impl From<ScoreRow> for ScoreRecord {
    fn from(row: ScoreRow) -> Self {
        ScoreRecord::new(
            row.puzzle_id,
            u64::try_from(row.duration_ms).unwrap_or_default(),
            row.solved_at,
        )
    }
}

/// Insertable score row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    puzzle_id: String,
    duration_ms: i64,
    solved_at: i64,
}

impl From<&ScoreRecord> for NewScore {
    fn from(score: &ScoreRecord) -> Self {
        Self::new(
            score.id().clone(),
            i64::try_from(*score.duration()).unwrap_or(i64::MAX),
            *score.timestamp(),
        )
    }
}

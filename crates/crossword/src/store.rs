//! Puzzle store gateway.
//!
//! Gameplay talks to storage only through [`PuzzleStore`]: explicit
//! request/response calls with named error kinds. [`PuzzleRepository`]
//! backs it with SQLite; [`MemoryStore`] keeps everything in maps and can
//! be told to fail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crossword_core::{PuzzleRecord, ScoreRecord};
use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

use crate::db::{DbError, NewPuzzle, NewScore, PuzzleRepository};

/// Category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StoreErrorKind {
    /// No puzzle with the requested id.
    NotFound,
    /// The store could not be reached.
    StoreUnavailable,
    /// A write was rejected.
    WriteFailed,
    /// A stored record no longer decodes.
    Corrupt,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Failure category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Puzzle `id` does not exist.
    #[track_caller]
    pub fn not_found(id: &str) -> Self {
        Self::new(StoreErrorKind::NotFound, format!("No puzzle with id '{}'", id))
    }

    /// Returns true for a missing puzzle.
    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }

    #[track_caller]
    fn from_db(kind: StoreErrorKind, err: DbError) -> Self {
        Self::new(kind, err.message)
    }

    #[track_caller]
    fn from_join(err: tokio::task::JoinError) -> Self {
        Self::new(
            StoreErrorKind::StoreUnavailable,
            format!("Store task failed: {}", err),
        )
    }
}

/// One line of the puzzle listing.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PuzzleListing {
    id: String,
    publication_date: String,
    constructors: Vec<String>,
    solved_ms: Option<u64>,
}

impl PuzzleListing {
    fn new(record: &PuzzleRecord, score: Option<&ScoreRecord>) -> Self {
        Self {
            id: record.id().clone(),
            publication_date: record.publication_date().clone(),
            constructors: record.constructors().clone(),
            solved_ms: score.map(|s| *s.duration()),
        }
    }
}

/// Async access to stored puzzles and scores.
#[async_trait::async_trait]
pub trait PuzzleStore: Send + Sync {
    /// Fetches a puzzle by id.
    async fn get_puzzle(&self, id: &str) -> Result<PuzzleRecord, StoreError>;

    /// Inserts or replaces a puzzle.
    async fn put_puzzle(&self, record: PuzzleRecord) -> Result<(), StoreError>;

    /// Lists stored puzzles, newest first, with their scores.
    async fn list_puzzles(&self) -> Result<Vec<PuzzleListing>, StoreError>;

    /// Inserts or replaces the score for a puzzle.
    async fn put_score(&self, score: ScoreRecord) -> Result<(), StoreError>;

    /// Fetches the score for a puzzle, if solved.
    async fn get_score(&self, id: &str) -> Result<Option<ScoreRecord>, StoreError>;
}

#[async_trait::async_trait]
impl PuzzleStore for PuzzleRepository {
    #[instrument(skip(self))]
    async fn get_puzzle(&self, id: &str) -> Result<PuzzleRecord, StoreError> {
        let repo = self.clone();
        let key = id.to_string();
        let row = tokio::task::spawn_blocking(move || repo.get_puzzle(&key))
            .await
            .map_err(StoreError::from_join)?
            .map_err(|e| StoreError::from_db(StoreErrorKind::StoreUnavailable, e))?
            .ok_or_else(|| StoreError::not_found(id))?;

        row.parse_record().map_err(|e| {
            warn!(id, error = %e, "Stored puzzle is corrupt");
            StoreError::from_db(StoreErrorKind::Corrupt, e)
        })
    }

    #[instrument(skip(self, record), fields(id = %record.id()))]
    async fn put_puzzle(&self, record: PuzzleRecord) -> Result<(), StoreError> {
        let row = NewPuzzle::from_record(&record)
            .map_err(|e| StoreError::from_db(StoreErrorKind::WriteFailed, e))?;
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.put_puzzle(&row))
            .await
            .map_err(StoreError::from_join)?
            .map_err(|e| StoreError::from_db(StoreErrorKind::WriteFailed, e))
    }

    #[instrument(skip(self))]
    async fn list_puzzles(&self) -> Result<Vec<PuzzleListing>, StoreError> {
        let repo = self.clone();
        let listings = tokio::task::spawn_blocking(move || -> Result<Vec<PuzzleListing>, DbError> {
            let mut listings = Vec::new();
            for row in repo.list_puzzles()? {
                let record = match row.parse_record() {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(id = %row.id(), error = %e, "Skipping corrupt puzzle");
                        continue;
                    }
                };
                let score = repo.get_score(row.id())?.map(ScoreRecord::from);
                listings.push(PuzzleListing::new(&record, score.as_ref()));
            }
            Ok(listings)
        })
        .await
        .map_err(StoreError::from_join)?
        .map_err(|e| StoreError::from_db(StoreErrorKind::StoreUnavailable, e))?;

        debug!(count = listings.len(), "Listed puzzles");
        Ok(listings)
    }

    #[instrument(skip(self, score), fields(id = %score.id()))]
    async fn put_score(&self, score: ScoreRecord) -> Result<(), StoreError> {
        let row = NewScore::from(&score);
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.put_score(&row))
            .await
            .map_err(StoreError::from_join)?
            .map_err(|e| StoreError::from_db(StoreErrorKind::WriteFailed, e))
    }

    #[instrument(skip(self))]
    async fn get_score(&self, id: &str) -> Result<Option<ScoreRecord>, StoreError> {
        let repo = self.clone();
        let key = id.to_string();
        let row = tokio::task::spawn_blocking(move || repo.get_score(&key))
            .await
            .map_err(StoreError::from_join)?
            .map_err(|e| StoreError::from_db(StoreErrorKind::StoreUnavailable, e))?;
        Ok(row.map(ScoreRecord::from))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    puzzles: HashMap<String, PuzzleRecord>,
    scores: HashMap<String, ScoreRecord>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store for tests and demos.
///
/// Clones share the same maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read fail with `StoreUnavailable`.
    pub fn fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_reads = fail;
        }
    }

    /// Makes every write fail with `WriteFailed`.
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_writes = fail;
        }
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut MemoryState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.lock().map_err(|_| {
            StoreError::new(StoreErrorKind::StoreUnavailable, "Memory store lock poisoned")
        })?;
        f(&mut state)
    }
}

#[async_trait::async_trait]
impl PuzzleStore for MemoryStore {
    async fn get_puzzle(&self, id: &str) -> Result<PuzzleRecord, StoreError> {
        self.with_state(|state| {
            if state.fail_reads {
                return Err(StoreError::new(StoreErrorKind::StoreUnavailable, "Reads disabled"));
            }
            state
                .puzzles
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::not_found(id))
        })
    }

    async fn put_puzzle(&self, record: PuzzleRecord) -> Result<(), StoreError> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(StoreError::new(StoreErrorKind::WriteFailed, "Writes disabled"));
            }
            state.puzzles.insert(record.id().clone(), record);
            Ok(())
        })
    }

    async fn list_puzzles(&self) -> Result<Vec<PuzzleListing>, StoreError> {
        self.with_state(|state| {
            if state.fail_reads {
                return Err(StoreError::new(StoreErrorKind::StoreUnavailable, "Reads disabled"));
            }
            let mut listings: Vec<_> = state
                .puzzles
                .values()
                .map(|record| PuzzleListing::new(record, state.scores.get(record.id())))
                .collect();
            listings.sort_by(|a, b| {
                b.publication_date
                    .cmp(&a.publication_date)
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(listings)
        })
    }

    async fn put_score(&self, score: ScoreRecord) -> Result<(), StoreError> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(StoreError::new(StoreErrorKind::WriteFailed, "Writes disabled"));
            }
            state.scores.insert(score.id().clone(), score);
            Ok(())
        })
    }

    async fn get_score(&self, id: &str) -> Result<Option<ScoreRecord>, StoreError> {
        self.with_state(|state| {
            if state.fail_reads {
                return Err(StoreError::new(StoreErrorKind::StoreUnavailable, "Reads disabled"));
            }
            Ok(state.scores.get(id).cloned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: &str) -> PuzzleRecord {
        PuzzleRecord::new(
            id.to_string(),
            vec!["Ada".to_string()],
            None,
            date.to_string(),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_memory_round_trip_and_not_found() {
        let store = MemoryStore::new();
        store
            .put_puzzle(record("a", "2023-01-01"))
            .await
            .expect("Put");

        assert_eq!(store.get_puzzle("a").await.expect("Get").id(), "a");
        let err = store.get_puzzle("b").await.expect_err("Missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_memory_listing_is_newest_first_with_scores() {
        let store = MemoryStore::new();
        store.put_puzzle(record("old", "2022-05-01")).await.expect("Put");
        store.put_puzzle(record("new", "2023-05-01")).await.expect("Put");
        store
            .put_score(ScoreRecord::new("old".to_string(), 61_000, 0))
            .await
            .expect("Score");

        let listings = store.list_puzzles().await.expect("List");
        let ids: Vec<_> = listings.iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(*listings[1].solved_ms(), Some(61_000));
        assert_eq!(*listings[0].solved_ms(), None);
    }

    #[tokio::test]
    async fn test_memory_failure_injection() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let err = store
            .put_score(ScoreRecord::new("a".to_string(), 1, 1))
            .await
            .expect_err("Writes disabled");
        assert_eq!(err.kind, StoreErrorKind::WriteFailed);

        store.fail_reads(true);
        let err = store.get_puzzle("a").await.expect_err("Reads disabled");
        assert_eq!(err.kind, StoreErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_score_upsert_replaces() {
        let store = MemoryStore::new();
        store
            .put_score(ScoreRecord::new("a".to_string(), 9_000, 1))
            .await
            .expect("Score");
        store
            .put_score(ScoreRecord::new("a".to_string(), 4_000, 2))
            .await
            .expect("Score");
        let score = store.get_score("a").await.expect("Get").expect("Present");
        assert_eq!(*score.duration(), 4_000);
    }
}

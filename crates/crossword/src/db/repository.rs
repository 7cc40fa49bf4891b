//! Database repository for puzzles and scores.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, NewPuzzle, NewScore, PuzzleRow, ScoreRow, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for puzzle and score operations.
///
/// Every call opens its own connection, so the repository is cheap to
/// clone into blocking tasks.
#[derive(Debug, Clone)]
pub struct PuzzleRepository {
    db_path: String,
}

impl PuzzleRepository {
    /// Creates a repository for an existing, migrated database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating PuzzleRepository");
        Ok(Self { db_path })
    }

    /// Opens the database at `db_path`, creating it and applying any
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be reached or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(applied = applied.len(), "Database ready");
        Ok(repo)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Inserts or replaces a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, puzzle), fields(id = %puzzle.id()))]
    pub fn put_puzzle(&self, puzzle: &NewPuzzle) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        diesel::replace_into(schema::puzzles::table)
            .values(puzzle)
            .execute(&mut conn)?;

        info!(id = %puzzle.id(), date = %puzzle.publication_date(), "Puzzle stored");
        Ok(())
    }

    /// Gets a puzzle by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_puzzle(&self, id: &str) -> Result<Option<PuzzleRow>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::puzzles::table
            .filter(schema::puzzles::id.eq(id))
            .select(PuzzleRow::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Puzzle lookup");
        Ok(row)
    }

    /// Lists all puzzles, newest publication first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_puzzles(&self) -> Result<Vec<PuzzleRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::puzzles::table
            .order((
                schema::puzzles::publication_date.desc(),
                schema::puzzles::id.asc(),
            ))
            .select(PuzzleRow::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Puzzles loaded");
        Ok(rows)
    }

    /// Inserts or replaces the score for a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, score), fields(puzzle_id = %score.puzzle_id(), duration_ms = score.duration_ms()))]
    pub fn put_score(&self, score: &NewScore) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        diesel::replace_into(schema::scores::table)
            .values(score)
            .execute(&mut conn)?;

        info!(puzzle_id = %score.puzzle_id(), "Score recorded");
        Ok(())
    }

    /// Gets the score for a puzzle. Returns `None` if it was never solved.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_score(&self, puzzle_id: &str) -> Result<Option<ScoreRow>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::scores::table
            .filter(schema::scores::puzzle_id.eq(puzzle_id))
            .select(ScoreRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row)
    }
}

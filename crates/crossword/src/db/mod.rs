//! SQLite persistence for puzzles and scores.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{NewPuzzle, NewScore, PuzzleRow, ScoreRow};
pub use repository::PuzzleRepository;

//! Completion rules for crossword boards.
//!
//! Pure predicates over guesses, recomputed on demand after every input.
//! Boards are small enough that no incremental bookkeeping is kept.

pub mod clue;
pub mod puzzle;

pub use clue::{clue_complete, clue_partially_filled};
pub use puzzle::{puzzle_complete, puzzle_correct};

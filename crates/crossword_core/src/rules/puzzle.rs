//! Whole-board completion and correctness.

use tracing::instrument;

use crate::board::Board;

/// Returns true if every fillable cell holds a guess.
#[instrument(skip(board))]
pub fn puzzle_complete(board: &Board) -> bool {
    board
        .cells()
        .iter()
        .zip(board.guesses())
        .all(|(cell, guess)| !cell.is_fillable() || guess.is_some())
}

/// Returns true if every fillable cell's guess matches its answer.
///
/// Guesses and answers are both stored uppercase, so this is a
/// case-insensitive comparison of what the player typed. A correct board
/// is always complete.
#[instrument(skip(board))]
pub fn puzzle_correct(board: &Board) -> bool {
    board
        .cells()
        .iter()
        .zip(board.guesses())
        .all(|(cell, guess)| !cell.is_fillable() || (guess.is_some() && guess == cell.answer()))
}

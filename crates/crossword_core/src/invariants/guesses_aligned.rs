//! Guesses stay aligned with cells.

use super::Invariant;
use crate::typestate::Session;

/// Invariant: one guess slot per cell, and only fillable cells hold a guess.
pub struct GuessesAlignedInvariant;

impl Invariant<Session> for GuessesAlignedInvariant {
    fn holds(session: &Session) -> bool {
        let board = session.board();
        board.guesses().len() == board.cells().len()
            && board
                .cells()
                .iter()
                .zip(board.guesses())
                .all(|(cell, guess)| cell.is_fillable() || guess.is_none())
    }

    fn description() -> &'static str {
        "Guesses align with cells and blocks stay empty"
    }
}

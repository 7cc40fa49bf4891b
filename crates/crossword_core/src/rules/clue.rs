//! Per-clue fill predicates.

use crate::board::Board;
use crate::types::Clue;

/// Returns true if every cell of `clue` holds a guess.
pub fn clue_complete(clue: &Clue, board: &Board) -> bool {
    clue.cells().iter().all(|&cell| board.is_filled(cell))
}

/// Returns true if at least one cell of `clue` holds a guess.
pub fn clue_partially_filled(clue: &Clue, board: &Board) -> bool {
    clue.cells().iter().any(|&cell| board.is_filled(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mini_board;
    use crate::types::Letter;

    #[test]
    fn test_empty_clue_is_neither() {
        let board = mini_board();
        let clue = &board.clues()[0];
        assert!(!clue_complete(clue, &board));
        assert!(!clue_partially_filled(clue, &board));
    }

    #[test]
    fn test_partial_then_complete() {
        let mut board = mini_board();
        board.guesses_mut()[0] = Letter::new('x');
        let clue = board.clues()[0].clone();
        assert!(clue_partially_filled(&clue, &board));
        assert!(!clue_complete(&clue, &board));

        board.guesses_mut()[1] = Letter::new('y');
        board.guesses_mut()[2] = Letter::new('z');
        assert!(clue_complete(&clue, &board));
    }

    #[test]
    fn test_crossing_clue_sees_shared_cell() {
        let mut board = mini_board();
        board.guesses_mut()[0] = Letter::new('a');
        let down = board.clues()[2].clone();
        assert!(clue_partially_filled(&down, &board));
    }
}

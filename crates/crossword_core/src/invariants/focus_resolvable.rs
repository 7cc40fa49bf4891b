//! Focus always names a real clue.

use super::Invariant;
use crate::typestate::Session;

/// Invariant: the focused cell is fillable and has a clue in the focused
/// direction.
pub struct FocusResolvableInvariant;

impl Invariant<Session> for FocusResolvableInvariant {
    fn holds(session: &Session) -> bool {
        let focus = session.focus();
        let board = session.board();
        board
            .cell(focus.cell())
            .is_some_and(|cell| cell.is_fillable())
            && board.clue_for(focus.cell(), focus.direction()).is_some()
    }

    fn description() -> &'static str {
        "Focus is on a fillable cell with a clue in its direction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mini_session;
    use crate::{Direction, Focus};

    #[test]
    fn test_initial_focus_holds() {
        assert!(FocusResolvableInvariant::holds(&mini_session()));
    }

    #[test]
    fn test_wrong_direction_violates() {
        let mut session = mini_session();
        session.focus = Focus::new(7, Direction::Down);
        assert!(!FocusResolvableInvariant::holds(&session));
    }

    #[test]
    fn test_block_focus_violates() {
        let mut session = mini_session();
        session.focus = Focus::new(4, Direction::Across);
        assert!(!FocusResolvableInvariant::holds(&session));
    }
}

//! Contract-based validation for crossword actions.
//!
//! Preconditions reject an action before the session is touched.
//! Postconditions re-check the session invariants after it is applied.

use tracing::{instrument, warn};

use crate::action::{Action, ActionError};
use crate::focus::FocusError;
use crate::invariants::{CrosswordInvariants, InvariantSet};
use crate::timing::TimerState;
use crate::typestate::PuzzleInProgress;
use crate::types::Letter;

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ActionError>;
}

/// Precondition: a paused session only accepts `Resume`, and `Resume`
/// needs a paused session.
pub struct PauseGate;

impl PauseGate {
    /// Validates the action against the timer state.
    #[instrument(skip(game))]
    pub fn check(action: &Action, game: &PuzzleInProgress) -> Result<(), ActionError> {
        let paused = game.session().timing().state() == TimerState::Paused;
        match (paused, action) {
            (true, Action::Resume) | (false, Action::Pause) => Ok(()),
            (true, _) => Err(ActionError::Paused),
            (false, Action::Resume) => Err(ActionError::NotPaused),
            (false, _) => Ok(()),
        }
    }
}

/// Precondition: typed characters must normalize to a letter.
pub struct ValidLetter;

impl ValidLetter {
    /// Validates a `Letter` action's character.
    #[instrument]
    pub fn check(action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Letter(c) if Letter::new(*c).is_none() => Err(ActionError::InvalidLetter(*c)),
            _ => Ok(()),
        }
    }
}

/// Precondition: click targets must exist, and cell clicks must hit a
/// fillable cell.
pub struct ValidTarget;

impl ValidTarget {
    /// Validates `SelectCell` and `SelectClue` targets.
    #[instrument(skip(game))]
    pub fn check(action: &Action, game: &PuzzleInProgress) -> Result<(), ActionError> {
        let board = game.session().board();
        match action {
            Action::SelectCell(cell) if !board.cell(*cell).is_some_and(|c| c.is_fillable()) => {
                Err(ActionError::NotFillable(*cell))
            }
            Action::SelectClue(clue) if board.clue(*clue).is_none() => {
                Err(FocusError::UnknownClue(*clue).into())
            }
            _ => Ok(()),
        }
    }
}

/// Contract for actions applied to an in-progress puzzle.
///
/// Preconditions:
/// - Paused sessions only resume
/// - Letters are letters or digits
/// - Click targets exist
///
/// Postconditions:
/// - Guesses stay aligned with cells
/// - Focus resolves to a clue
/// - Timer state is consistent
pub struct ActionContract;

impl Contract<PuzzleInProgress, Action> for ActionContract {
    fn pre(game: &PuzzleInProgress, action: &Action) -> Result<(), ActionError> {
        PauseGate::check(action, game)?;
        ValidLetter::check(action)?;
        ValidTarget::check(action, game)?;
        Ok(())
    }

    fn post(_before: &PuzzleInProgress, after: &PuzzleInProgress) -> Result<(), ActionError> {
        CrosswordInvariants::check_all(after.session()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            ActionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

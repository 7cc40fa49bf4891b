//! First-class input actions for a crossword session.
//!
//! Every key press, click and timer toggle becomes one [`Action`] value fed
//! to a single dispatcher, so the whole interaction model can be driven
//! without a rendering surface.

use serde::{Deserialize, Serialize};

use crate::focus::FocusError;
use crate::timing::TimingError;
use crate::types::{CellIndex, ClueId, Direction};

/// An arrow key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum ArrowKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

impl ArrowKey {
    /// The clue direction this key moves along.
    pub fn axis(self) -> Direction {
        match self {
            ArrowKey::Left | ArrowKey::Right => Direction::Across,
            ArrowKey::Up | ArrowKey::Down => Direction::Down,
        }
    }

    /// Returns true for keys that advance through a clue.
    pub fn forward(self) -> bool {
        matches!(self, ArrowKey::Right | ArrowKey::Down)
    }
}

/// A player intent applied to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Type a character into the focused cell.
    Letter(char),
    /// Clear the focused cell and step back.
    Backspace,
    /// Jump to the next clue.
    NextClue,
    /// Jump to the previous clue.
    PreviousClue,
    /// Arrow key navigation.
    Arrow(ArrowKey),
    /// Focus a cell (click).
    SelectCell(CellIndex),
    /// Focus a clue (click in the clue list).
    SelectClue(ClueId),
    /// Pause the timer and hide the grid.
    Pause,
    /// Resume the timer.
    Resume,
}

impl Action {
    /// Returns true if the action writes or clears a guess.
    pub fn is_edit(&self) -> bool {
        matches!(self, Action::Letter(_) | Action::Backspace)
    }

    /// Returns true if the action only moves focus.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::NextClue
                | Action::PreviousClue
                | Action::Arrow(_)
                | Action::SelectCell(_)
                | Action::SelectClue(_)
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Letter(c) => write!(f, "Letter({:?})", c),
            Action::Backspace => write!(f, "Backspace"),
            Action::NextClue => write!(f, "NextClue"),
            Action::PreviousClue => write!(f, "PreviousClue"),
            Action::Arrow(key) => write!(f, "Arrow({})", key),
            Action::SelectCell(cell) => write!(f, "SelectCell({})", cell),
            Action::SelectClue(clue) => write!(f, "SelectClue({})", clue),
            Action::Pause => write!(f, "Pause"),
            Action::Resume => write!(f, "Resume"),
        }
    }
}

/// Error that can occur when validating or applying an action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The typed character is not a letter or digit.
    #[display("{:?} is not a valid letter", _0)]
    InvalidLetter(char),

    /// The target cell is a block or outside the grid.
    #[display("Cell {} cannot hold a letter", _0)]
    NotFillable(CellIndex),

    /// The session is paused; only resume is accepted.
    #[display("Puzzle is paused")]
    Paused,

    /// Resume was requested while the timer is running.
    #[display("Puzzle is not paused")]
    NotPaused,

    /// The puzzle is solved; guesses are frozen.
    #[display("Puzzle is already solved")]
    PuzzleSolved,

    /// Focus could not be moved or resolved.
    #[display("Focus error: {}", _0)]
    Focus(FocusError),

    /// The timer rejected a transition.
    #[display("Timing error: {}", _0)]
    Timing(TimingError),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl ActionError {
    /// Returns true for errors that indicate a corrupted session rather
    /// than a rejected input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ActionError::InvariantViolation(_) | ActionError::Focus(FocusError::Unresolved { .. })
        )
    }
}

impl std::error::Error for ActionError {}

impl From<FocusError> for ActionError {
    fn from(err: FocusError) -> Self {
        match err {
            FocusError::NotFillable(cell) => ActionError::NotFillable(cell),
            other => ActionError::Focus(other),
        }
    }
}

impl From<TimingError> for ActionError {
    fn from(err: TimingError) -> Self {
        ActionError::Timing(err)
    }
}

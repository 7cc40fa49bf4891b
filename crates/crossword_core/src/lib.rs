//! Crossword core - the puzzle interaction state machine
//!
//! Pure game logic with no I/O: board validation, the focus cursor and its
//! navigation rules, completion and correctness checks, the solve timer,
//! and a typestate session that turns input actions into render
//! notifications.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use crossword_core::{Action, PuzzleRecord, PuzzleSetup, SessionStep};
//!
//! # fn example(record: PuzzleRecord) -> Result<(), Box<dyn std::error::Error>> {
//! let game = PuzzleSetup::load(&record)?.start(Utc::now());
//! match game.apply(Action::Letter('a'), Utc::now())? {
//!     SessionStep::InProgress { notifications, .. } => println!("{:?}", notifications),
//!     SessionStep::Solved { game, .. } => println!("Solved in {:?}", game.duration()),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod contracts;
mod error;
mod focus;
mod format;
mod invariants;
mod notification;
mod record;
mod rules;
mod summary;
mod timing;
mod typestate;
mod types;

#[cfg(test)]
mod fixtures;

// Crate-level exports - Domain types
pub use types::{Cell, CellIndex, CellKind, Clue, ClueId, ClueList, Dimensions, Direction, Letter};

// Crate-level exports - Wire records
pub use record::{
    BoardDefinition, CellDefinition, ClueDefinition, ClueListDefinition, PuzzleInfo,
    PuzzleRecord, ScoreRecord, TextSegment,
};

// Crate-level exports - Board and validation
pub use board::Board;
pub use error::PuzzleError;

// Crate-level exports - Focus controller
pub use focus::{ClueMoveOptions, Focus, FocusError, MoveOptions};

// Crate-level exports - Completion rules
pub use rules::{clue_complete, clue_partially_filled, puzzle_complete, puzzle_correct};

// Crate-level exports - Timing
pub use timing::{TimerState, Timing, TimingError};

// Crate-level exports - Actions and session phases
pub use action::{Action, ActionError, ArrowKey};
pub use contracts::{ActionContract, Contract, PauseGate, ValidLetter, ValidTarget};
pub use invariants::{
    CrosswordInvariants, FocusResolvableInvariant, GuessesAlignedInvariant, Invariant,
    InvariantSet, InvariantViolation, TimingConsistentInvariant,
};
pub use notification::Notification;
pub use typestate::{AnyPuzzle, PuzzleInProgress, PuzzleSetup, PuzzleSolved, Session, SessionStep};

// Crate-level exports - Summary and formatting
pub use format::{
    byline, format_clock, format_finish_time, format_list, format_publication_date,
    parse_publication_date,
};
pub use summary::{Summary, SummaryError, generate as generate_summary};

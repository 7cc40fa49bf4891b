//! Change notifications for the rendering adapter.
//!
//! The core never touches presentation. Each applied action yields a list
//! of these, and the adapter updates its own per-cell and per-clue view
//! state from them alone.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{CellIndex, ClueId, Letter};

/// A state change the view should reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A cell's guess was written or cleared.
    GuessChanged {
        /// Cell that changed.
        cell: CellIndex,
        /// New guess, `None` when cleared.
        guess: Option<Letter>,
    },
    /// Every cell of a clue now holds a guess.
    ClueCompleted {
        /// Completed clue.
        clue: ClueId,
    },
    /// A clue lost a guess.
    ClueIncomplete {
        /// Affected clue.
        clue: ClueId,
    },
    /// Focus moved or turned.
    FocusChanged {
        /// Focused cell.
        cell: CellIndex,
        /// Active clue.
        clue: ClueId,
    },
    /// The grid is full but wrong somewhere.
    IncorrectFill,
    /// The timer paused.
    Paused,
    /// The timer resumed.
    Resumed,
    /// The grid is full and correct.
    Solved {
        /// Final solve time.
        duration: Duration,
    },
}

//! Load-time validation errors.

use crate::types::{CellIndex, ClueId, Direction};

/// A puzzle definition that violates the board invariants.
///
/// Raised when a record is imported or loaded; a board is never built
/// from data that produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PuzzleError {
    /// The record has no board body.
    #[display("Puzzle has no board body")]
    EmptyBody,

    /// Width or height is zero or too large.
    #[display("Invalid dimensions {}x{}", width, height)]
    InvalidDimensions {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// The cell count does not match width × height.
    #[display("Expected {} cells, found {}", expected, actual)]
    CellCountMismatch {
        /// width × height.
        expected: usize,
        /// Cells present.
        actual: usize,
    },

    /// The puzzle has no clues at all.
    #[display("Puzzle has no clues")]
    NoClues,

    /// A fillable cell has no answer.
    #[display("Cell {} is fillable but has no answer", _0)]
    MissingAnswer(CellIndex),

    /// A fillable cell's answer is not a single letter or digit.
    #[display("Cell {} has unsupported answer {:?}", cell, answer)]
    InvalidAnswer {
        /// Offending cell.
        cell: CellIndex,
        /// Answer as stored.
        answer: String,
    },

    /// A clue has no cells.
    #[display("Clue {} has no cells", _0)]
    EmptyClue(ClueId),

    /// A clue references a cell index outside the grid.
    #[display("Clue {} references missing cell {}", clue, cell)]
    ClueCellOutOfRange {
        /// Offending clue.
        clue: ClueId,
        /// Missing cell index.
        cell: CellIndex,
    },

    /// A clue references a block cell.
    #[display("Clue {} references block cell {}", clue, cell)]
    ClueCellNotFillable {
        /// Offending clue.
        clue: ClueId,
        /// Block cell.
        cell: CellIndex,
    },

    /// A clue's cells are not adjacent along its direction.
    #[display("Clue {} is not contiguous at cell {}", clue, cell)]
    DiscontiguousClue {
        /// Offending clue.
        clue: ClueId,
        /// First cell that breaks the run.
        cell: CellIndex,
    },

    /// A cell claims a clue id that does not exist.
    #[display("Cell {} references missing clue {}", cell, clue)]
    UnknownClue {
        /// Offending cell.
        cell: CellIndex,
        /// Missing clue id.
        clue: ClueId,
    },

    /// A cell claims two clues running the same way.
    #[display("Cell {} belongs to two {} clues", cell, direction)]
    DuplicateDirection {
        /// Offending cell.
        cell: CellIndex,
        /// Repeated direction.
        direction: Direction,
    },

    /// Cell and clue disagree about membership.
    #[display("Cell {} and clue {} disagree about membership", cell, clue)]
    MembershipMismatch {
        /// Cell side of the pair.
        cell: CellIndex,
        /// Clue side of the pair.
        clue: ClueId,
    },

    /// A fillable cell belongs to no clue.
    #[display("Cell {} belongs to no clue", _0)]
    OrphanCell(CellIndex),

    /// A block cell claims clue membership.
    #[display("Block cell {} claims clue membership", _0)]
    BlockWithClues(CellIndex),

    /// A clue list names a clue that does not exist.
    #[display("Clue list {:?} references missing clue {}", list, clue)]
    UnknownListedClue {
        /// List name.
        list: String,
        /// Missing clue id.
        clue: ClueId,
    },
}

impl std::error::Error for PuzzleError {}

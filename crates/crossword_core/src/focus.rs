//! Focus controller: the cursor over the grid and its navigation rules.
//!
//! A [`Focus`] is a cell plus a direction. Together they pick the active
//! clue. Every navigation operation mutates the focus in place and reports
//! whether it actually moved, so callers can emit a redraw only when needed.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::action::ArrowKey;
use crate::board::Board;
use crate::rules::{clue_complete, clue_partially_filled};
use crate::types::{CellIndex, Clue, ClueId, Direction};

/// Options for stepping through the active clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOptions {
    /// Step toward the end of the clue.
    pub forward: bool,
    /// Wrap past either end instead of stopping.
    pub wrap: bool,
    /// Step over cells that already hold a guess.
    pub skip_filled: bool,
}

/// Options for jumping between clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueMoveOptions {
    /// Jump to the next clue rather than the previous one.
    pub forward: bool,
    /// Stay put if the destination clue already has a guess in it.
    pub skip_partial: bool,
}

/// Error raised when focus cannot be resolved or moved.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FocusError {
    /// The focused cell has no clue in the focused direction.
    #[display("Cell {} has no {} clue", cell, direction)]
    Unresolved {
        /// Focused cell.
        cell: CellIndex,
        /// Focused direction.
        direction: Direction,
    },

    /// A block cell cannot take focus.
    #[display("Cell {} is a block", _0)]
    NotFillable(CellIndex),

    /// The cell index is outside the grid.
    #[display("Cell {} does not exist", _0)]
    UnknownCell(CellIndex),

    /// The clue id does not exist.
    #[display("Clue {} does not exist", _0)]
    UnknownClue(ClueId),
}

impl std::error::Error for FocusError {}

/// The selected cell and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Focus {
    cell: CellIndex,
    direction: Direction,
}

impl Focus {
    /// Creates a focus without checking it against a board.
    pub fn new(cell: CellIndex, direction: Direction) -> Self {
        Self { cell, direction }
    }

    /// First cell of the first clue, in that clue's direction.
    ///
    /// Returns `None` only for a board with no clues, which never loads.
    pub fn initial(board: &Board) -> Option<Self> {
        board
            .clues()
            .first()
            .map(|clue| Self::new(clue.first_cell(), *clue.direction()))
    }

    /// Focused cell.
    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    /// Focused direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The active clue: the focused cell's clue in the focused direction.
    ///
    /// # Errors
    ///
    /// [`FocusError::Unresolved`] if no such clue exists. This is an
    /// invariant violation and is logged at error level.
    pub fn resolve<'b>(&self, board: &'b Board) -> Result<&'b Clue, FocusError> {
        board.clue_for(self.cell, self.direction).ok_or_else(|| {
            error!(
                cell = self.cell,
                direction = %self.direction,
                "Focus does not resolve to a clue"
            );
            FocusError::Unresolved {
                cell: self.cell,
                direction: self.direction,
            }
        })
    }

    /// Steps the cursor within the active clue.
    ///
    /// Without `wrap`, a step off either end is a no-op. With
    /// `skip_filled` on an incomplete clue, filled cells are stepped over;
    /// a complete clue always takes the first step.
    #[instrument(skip(board))]
    pub fn move_within_clue(
        &mut self,
        board: &Board,
        options: MoveOptions,
    ) -> Result<bool, FocusError> {
        let clue = self.resolve(board)?;
        let len = clue.len();
        let position = clue.position_of(self.cell).ok_or(FocusError::Unresolved {
            cell: self.cell,
            direction: self.direction,
        })?;

        if !options.wrap {
            let at_end = if options.forward {
                position + 1 == len
            } else {
                position == 0
            };
            if at_end {
                return Ok(false);
            }
        }

        let step = |p: usize| {
            if options.forward {
                (p + 1) % len
            } else {
                (p + len - 1) % len
            }
        };

        let mut next = step(position);
        if options.skip_filled && !clue_complete(clue, board) {
            let mut steps = 1;
            while board.is_filled(clue.cells()[next]) && steps < len {
                next = step(next);
                steps += 1;
            }
        }

        Ok(self.set_cell(clue.cells()[next]))
    }

    /// Jumps to the first cell of the next or previous clue.
    ///
    /// Clue order is cyclic in both directions. With `skip_partial`, a
    /// destination clue that already holds any guess leaves focus unchanged.
    #[instrument(skip(board))]
    pub fn move_to_adjacent_clue(
        &mut self,
        board: &Board,
        options: ClueMoveOptions,
    ) -> Result<bool, FocusError> {
        let current = *self.resolve(board)?.id();
        let count = board.clues().len();
        let target_id = if options.forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        let target = board
            .clue(target_id)
            .ok_or(FocusError::UnknownClue(target_id))?;

        if options.skip_partial && clue_partially_filled(target, board) {
            debug!(target = target_id, "Destination clue already started");
            return Ok(false);
        }

        Ok(self.jump_to(target))
    }

    /// Flips direction when the focused cell has clues both ways.
    #[instrument(skip(board))]
    pub fn toggle_direction(&mut self, board: &Board) -> bool {
        let other = self.direction.other();
        if board.clue_for(self.cell, other).is_some() {
            self.direction = other;
            true
        } else {
            false
        }
    }

    /// Focuses an arbitrary fillable cell.
    ///
    /// A cell with a single clue forces that clue's direction; a cell with
    /// both keeps the current direction.
    #[instrument(skip(board))]
    pub fn select_cell(&mut self, board: &Board, cell: CellIndex) -> Result<bool, FocusError> {
        let target = board.cell(cell).ok_or(FocusError::UnknownCell(cell))?;
        if !target.is_fillable() {
            return Err(FocusError::NotFillable(cell));
        }

        let direction = if board.clue_for(cell, self.direction).is_some() {
            self.direction
        } else {
            board
                .clues_of(cell)
                .next()
                .map(|clue| *clue.direction())
                .ok_or(FocusError::Unresolved {
                    cell,
                    direction: self.direction,
                })?
        };

        let before = *self;
        self.cell = cell;
        self.direction = direction;
        Ok(before != *self)
    }

    /// Focuses a clue.
    ///
    /// If the cursor is already inside the clue and running its way, it
    /// stays where it is; otherwise it moves to the clue's first cell.
    #[instrument(skip(board))]
    pub fn select_clue(&mut self, board: &Board, clue: ClueId) -> Result<bool, FocusError> {
        let target = board.clue(clue).ok_or(FocusError::UnknownClue(clue))?;
        if target.contains(self.cell) && *target.direction() == self.direction {
            return Ok(false);
        }
        Ok(self.jump_to(target))
    }

    /// Handles an arrow key.
    ///
    /// A key across the current direction turns the cursor if the cell has
    /// a clue that way. A key along it steps through the clue, wrapping.
    #[instrument(skip(board))]
    pub fn arrow(&mut self, board: &Board, key: ArrowKey) -> Result<bool, FocusError> {
        if key.axis() != self.direction {
            return Ok(self.toggle_direction(board));
        }
        self.move_within_clue(
            board,
            MoveOptions {
                forward: key.forward(),
                wrap: true,
                skip_filled: false,
            },
        )
    }

    fn set_cell(&mut self, cell: CellIndex) -> bool {
        let moved = self.cell != cell;
        self.cell = cell;
        moved
    }

    fn jump_to(&mut self, clue: &Clue) -> bool {
        let before = *self;
        self.cell = clue.first_cell();
        self.direction = *clue.direction();
        before != *self
    }
}

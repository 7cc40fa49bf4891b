//! Board model: immutable geometry and answers plus the mutable guesses.

use tracing::{debug, instrument, warn};

use crate::action::ActionError;
use crate::error::PuzzleError;
use crate::record::{BoardDefinition, CellDefinition};
use crate::types::{Cell, CellIndex, Clue, ClueId, ClueList, Dimensions, Direction, Letter};

/// Largest accepted grid side.
const MAX_SIDE: usize = 64;

/// A validated crossword board.
///
/// Everything except `guesses` is fixed once loaded. `guesses` always has
/// one slot per cell and only fillable cells ever hold a letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    clues: Vec<Clue>,
    clue_lists: Vec<ClueList>,
    guesses: Vec<Option<Letter>>,
}

impl Board {
    /// Validates a raw definition and builds a board with empty guesses.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] describing the first broken invariant.
    #[instrument(skip(def), fields(cells = def.cells().len(), clues = def.clues().len()))]
    pub fn from_definition(def: &BoardDefinition) -> Result<Self, PuzzleError> {
        let dimensions = *def.dimensions();
        let Dimensions { width, height } = dimensions;
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            warn!(width, height, "Rejected puzzle dimensions");
            return Err(PuzzleError::InvalidDimensions { width, height });
        }

        let expected = width * height;
        if def.cells().len() != expected {
            return Err(PuzzleError::CellCountMismatch {
                expected,
                actual: def.cells().len(),
            });
        }

        if def.clues().is_empty() {
            return Err(PuzzleError::NoClues);
        }

        let clues = build_clues(def, width)?;
        let cells = build_cells(def.cells(), &clues)?;

        let mut clue_lists = Vec::with_capacity(def.clue_lists().len());
        for list in def.clue_lists() {
            if let Some(&missing) = list.clues().iter().find(|&&id| id >= clues.len()) {
                return Err(PuzzleError::UnknownListedClue {
                    list: list.name().clone(),
                    clue: missing,
                });
            }
            clue_lists.push(ClueList::new(list.name().clone(), list.clues().clone()));
        }

        debug!(width, height, clues = clues.len(), "Board validated");

        Ok(Self {
            dimensions,
            guesses: vec![None; cells.len()],
            cells,
            clues,
            clue_lists,
        })
    }

    /// Grid size.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `index`.
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// All clues in overall clue order.
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// The clue with the given id.
    pub fn clue(&self, id: ClueId) -> Option<&Clue> {
        self.clues.get(id)
    }

    /// Display groupings of clues.
    pub fn clue_lists(&self) -> &[ClueList] {
        &self.clue_lists
    }

    /// One guess slot per cell.
    pub fn guesses(&self) -> &[Option<Letter>] {
        &self.guesses
    }

    /// The guess in `cell`, if any.
    pub fn guess(&self, cell: CellIndex) -> Option<Letter> {
        self.guesses.get(cell).copied().flatten()
    }

    /// Returns true if `cell` holds a guess.
    pub fn is_filled(&self, cell: CellIndex) -> bool {
        self.guess(cell).is_some()
    }

    /// The clue running in `direction` through `cell`.
    pub fn clue_for(&self, cell: CellIndex, direction: Direction) -> Option<&Clue> {
        self.clues_of(cell).find(|clue| *clue.direction() == direction)
    }

    /// Every clue `cell` belongs to.
    pub fn clues_of(&self, cell: CellIndex) -> impl Iterator<Item = &Clue> + '_ {
        self.cells
            .get(cell)
            .map(|c| c.clues().as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.clues.get(id))
    }

    /// Row and column of `cell`.
    pub fn coordinates(&self, cell: CellIndex) -> (usize, usize) {
        (cell / self.dimensions.width, cell % self.dimensions.width)
    }

    /// Cell index at a row and column, if inside the grid.
    pub fn index_at(&self, row: usize, col: usize) -> Option<CellIndex> {
        (row < self.dimensions.height && col < self.dimensions.width)
            .then_some(row * self.dimensions.width + col)
    }

    /// Writes or clears a guess.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFillable`] for block or out-of-range cells,
    /// leaving the guesses untouched.
    #[instrument(skip(self))]
    pub(crate) fn set_guess(
        &mut self,
        cell: CellIndex,
        guess: Option<Letter>,
    ) -> Result<(), ActionError> {
        match self.cells.get(cell) {
            Some(c) if c.is_fillable() => {
                self.guesses[cell] = guess;
                Ok(())
            }
            _ => Err(ActionError::NotFillable(cell)),
        }
    }

    #[cfg(test)]
    pub(crate) fn guesses_mut(&mut self) -> &mut Vec<Option<Letter>> {
        &mut self.guesses
    }
}

/// Validates clue geometry and builds the clue list.
fn build_clues(def: &BoardDefinition, width: usize) -> Result<Vec<Clue>, PuzzleError> {
    let mut clues = Vec::with_capacity(def.clues().len());

    for (id, raw) in def.clues().iter().enumerate() {
        if raw.cells().is_empty() {
            return Err(PuzzleError::EmptyClue(id));
        }

        for &cell in raw.cells() {
            let Some(c) = def.cells().get(cell) else {
                return Err(PuzzleError::ClueCellOutOfRange { clue: id, cell });
            };
            if !c.is_fillable() {
                return Err(PuzzleError::ClueCellNotFillable { clue: id, cell });
            }
        }

        for pair in raw.cells().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let contiguous = match raw.direction() {
                Direction::Across => b == a + 1 && a / width == b / width,
                Direction::Down => b == a + width,
            };
            if !contiguous {
                return Err(PuzzleError::DiscontiguousClue { clue: id, cell: b });
            }
        }

        clues.push(Clue::new(
            id,
            *raw.direction(),
            raw.label().clone(),
            raw.cells().clone(),
            raw.text().clone(),
        ));
    }

    Ok(clues)
}

/// Validates answers and clue membership and builds the cells.
fn build_cells(raw_cells: &[CellDefinition], clues: &[Clue]) -> Result<Vec<Cell>, PuzzleError> {
    let mut cells = Vec::with_capacity(raw_cells.len());

    for (index, raw) in raw_cells.iter().enumerate() {
        if !raw.is_fillable() {
            if !raw.clues().is_empty() {
                return Err(PuzzleError::BlockWithClues(index));
            }
            cells.push(Cell::block());
            continue;
        }

        let answer = parse_answer(index, raw.answer().as_deref())?;

        if raw.clues().is_empty() {
            return Err(PuzzleError::OrphanCell(index));
        }

        let mut directions = Vec::with_capacity(2);
        for &clue_id in raw.clues() {
            let Some(clue) = clues.get(clue_id) else {
                return Err(PuzzleError::UnknownClue {
                    cell: index,
                    clue: clue_id,
                });
            };
            if !clue.contains(index) {
                return Err(PuzzleError::MembershipMismatch {
                    cell: index,
                    clue: clue_id,
                });
            }
            if directions.contains(clue.direction()) {
                return Err(PuzzleError::DuplicateDirection {
                    cell: index,
                    direction: *clue.direction(),
                });
            }
            directions.push(*clue.direction());
        }

        cells.push(Cell::fillable(raw.label().clone(), answer, raw.clues().clone()));
    }

    // Every clue cell must list the clue back.
    for clue in clues {
        for &cell in clue.cells() {
            if !cells[cell].clues().contains(clue.id()) {
                return Err(PuzzleError::MembershipMismatch {
                    cell,
                    clue: *clue.id(),
                });
            }
        }
    }

    Ok(cells)
}

fn parse_answer(cell: CellIndex, answer: Option<&str>) -> Result<Letter, PuzzleError> {
    let answer = answer.ok_or(PuzzleError::MissingAnswer(cell))?.trim();
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Letter::new(c).ok_or_else(|| PuzzleError::InvalidAnswer {
            cell,
            answer: answer.to_string(),
        }),
        (None, _) => Err(PuzzleError::MissingAnswer(cell)),
        _ => Err(PuzzleError::InvalidAnswer {
            cell,
            answer: answer.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mini_board, mini_definition};
    use serde_json::json;

    fn definition(value: serde_json::Value) -> BoardDefinition {
        serde_json::from_value(value).expect("Parse failed")
    }

    #[test]
    fn test_mini_board_loads() {
        let board = mini_board();
        assert_eq!(board.cells().len(), 9);
        assert_eq!(board.clues().len(), 4);
        assert_eq!(board.guesses().len(), board.cells().len());
        assert!(board.guesses().iter().all(Option::is_none));
        assert!(!board.cells()[4].is_fillable());
    }

    #[test]
    fn test_answers_are_uppercased() {
        let value = json!({
            "dimensions": {"width": 1, "height": 1},
            "cells": [{"type": 1, "answer": "q", "clues": [0]}],
            "clues": [{"cells": [0], "direction": "Across", "label": "1"}]
        });
        let board = Board::from_definition(&definition(value)).expect("Load failed");
        assert_eq!(board.cells()[0].answer().map(Letter::as_char), Some('Q'));
    }

    #[test]
    fn test_clue_lookup_by_direction() {
        let board = mini_board();
        assert_eq!(board.clue_for(0, Direction::Across).map(|c| *c.id()), Some(0));
        assert_eq!(board.clue_for(0, Direction::Down).map(|c| *c.id()), Some(2));
        assert!(board.clue_for(1, Direction::Down).is_none());
    }

    #[test]
    fn test_set_guess_rejects_block() {
        let mut board = mini_board();
        let result = board.set_guess(4, Letter::new('A'));
        assert_eq!(result, Err(ActionError::NotFillable(4)));
        assert!(board.guesses().iter().all(Option::is_none));
    }

    #[test]
    fn test_rejects_cell_count_mismatch() {
        let value = json!({
            "dimensions": {"width": 2, "height": 1},
            "cells": [{"type": 1, "answer": "A", "clues": [0]}],
            "clues": [{"cells": [0], "direction": "Across", "label": "1"}]
        });
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::CellCountMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_rejects_clue_with_missing_cell() {
        let value = json!({
            "dimensions": {"width": 1, "height": 1},
            "cells": [{"type": 1, "answer": "A", "clues": [0]}],
            "clues": [{"cells": [0, 1], "direction": "Across", "label": "1"}]
        });
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::ClueCellOutOfRange { clue: 0, cell: 1 })
        );
    }

    #[test]
    fn test_rejects_two_clues_same_direction() {
        let value = json!({
            "dimensions": {"width": 2, "height": 1},
            "cells": [
                {"type": 1, "answer": "A", "clues": [0, 1]},
                {"type": 1, "answer": "B", "clues": [0]}
            ],
            "clues": [
                {"cells": [0, 1], "direction": "Across", "label": "1"},
                {"cells": [0], "direction": "Across", "label": "2"}
            ]
        });
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::DuplicateDirection {
                cell: 0,
                direction: Direction::Across
            })
        );
    }

    #[test]
    fn test_rejects_across_clue_wrapping_rows() {
        let value = json!({
            "dimensions": {"width": 2, "height": 2},
            "cells": [
                {},
                {"type": 1, "answer": "A", "clues": [0]},
                {"type": 1, "answer": "B", "clues": [0]},
                {}
            ],
            "clues": [{"cells": [1, 2], "direction": "Across", "label": "1"}]
        });
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::DiscontiguousClue { clue: 0, cell: 2 })
        );
    }

    #[test]
    fn test_rejects_rebus_answer() {
        let value = json!({
            "dimensions": {"width": 1, "height": 1},
            "cells": [{"type": 1, "answer": "STAR", "clues": [0]}],
            "clues": [{"cells": [0], "direction": "Across", "label": "1"}]
        });
        assert!(matches!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::InvalidAnswer { cell: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_membership_mismatch() {
        let mut value = serde_json::to_value(mini_definition()).expect("Serialize failed");
        // Cell 1 claims 1-Down, which runs through cells 0, 3 and 6.
        value["cells"][1]["clues"] = json!([0, 2]);
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::MembershipMismatch { cell: 1, clue: 2 })
        );
    }

    #[test]
    fn test_rejects_orphan_cell() {
        let mut value = serde_json::to_value(mini_definition()).expect("Serialize failed");
        value["cells"][1]["clues"] = json!([]);
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::OrphanCell(1))
        );
    }

    #[test]
    fn test_rejects_unknown_listed_clue() {
        let mut value = serde_json::to_value(mini_definition()).expect("Serialize failed");
        value["clueLists"] = json!([{"name": "Across", "clues": [0, 9]}]);
        assert_eq!(
            Board::from_definition(&definition(value)),
            Err(PuzzleError::UnknownListedClue {
                list: "Across".to_string(),
                clue: 9
            })
        );
    }
}

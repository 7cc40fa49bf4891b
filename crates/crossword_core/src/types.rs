//! Core domain types for crossword puzzles.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::record::TextSegment;

/// Index of a cell in the board's row-major cell sequence.
pub type CellIndex = usize;

/// Identifier of a clue: its position in the board's clue sequence.
pub type ClueId = usize;

/// Direction a clue runs in.
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
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Direction {
    /// Returns the perpendicular direction.
    pub fn other(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

/// A single guess or answer character, always stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letter(char);

impl Letter {
    /// Normalizes a typed character into a letter.
    ///
    /// Accepts ASCII letters and digits; anything else yields `None`.
    #[instrument]
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_alphanumeric() {
            Some(Self(c.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Returns the uppercase character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a cell can hold a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Black square.
    Block,
    /// Square that takes a letter.
    Fillable,
}

/// Grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Cell {
    kind: CellKind,
    label: Option<String>,
    answer: Option<Letter>,
    clues: Vec<ClueId>,
}

impl Cell {
    pub(crate) fn block() -> Self {
        Self {
            kind: CellKind::Block,
            label: None,
            answer: None,
            clues: Vec::new(),
        }
    }

    pub(crate) fn fillable(label: Option<String>, answer: Letter, clues: Vec<ClueId>) -> Self {
        Self {
            kind: CellKind::Fillable,
            label,
            answer: Some(answer),
            clues,
        }
    }

    /// Returns true if the cell takes a letter.
    pub fn is_fillable(&self) -> bool {
        self.kind == CellKind::Fillable
    }
}

/// A labeled run of fillable cells in one direction.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Clue {
    id: ClueId,
    direction: Direction,
    label: String,
    cells: Vec<CellIndex>,
    text: Vec<TextSegment>,
}

impl Clue {
    pub(crate) fn new(
        id: ClueId,
        direction: Direction,
        label: String,
        cells: Vec<CellIndex>,
        text: Vec<TextSegment>,
    ) -> Self {
        Self {
            id,
            direction,
            label,
            cells,
            text,
        }
    }

    /// Number of cells in the clue.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the clue has no cells (never the case for a loaded board).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of `cell` within this clue, if it belongs to it.
    pub fn position_of(&self, cell: CellIndex) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    /// Returns true if `cell` is part of this clue.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }

    /// First cell of the clue.
    pub fn first_cell(&self) -> CellIndex {
        self.cells[0]
    }

    /// Clue body as plain text, segments joined by spaces.
    pub fn plain_text(&self) -> String {
        self.text
            .iter()
            .map(|segment| segment.plain().as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Display grouping of clues such as "Across" or "Down".
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ClueList {
    name: String,
    clues: Vec<ClueId>,
}

impl ClueList {
    pub(crate) fn new(name: String, clues: Vec<ClueId>) -> Self {
        Self { name, clues }
    }
}

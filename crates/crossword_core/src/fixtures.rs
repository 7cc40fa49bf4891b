//! Shared test boards.
//!
//! The mini puzzle is a 3×3 grid with a block in the center:
//!
//! ```text
//! A B C
//! D # E
//! F G H
//! ```
//!
//! Clues: 0 = 1-Across [0,1,2], 1 = 3-Across [6,7,8],
//! 2 = 1-Down [0,3,6], 3 = 2-Down [2,5,8].

use crate::board::Board;
use crate::record::{BoardDefinition, PuzzleRecord};
use crate::typestate::{PuzzleSetup, Session};

pub(crate) const MINI_JSON: &str = include_str!("../tests/fixtures/mini.json");

pub(crate) fn mini_record() -> PuzzleRecord {
    serde_json::from_str(MINI_JSON).expect("Fixture parse failed")
}

pub(crate) fn mini_definition() -> BoardDefinition {
    mini_record()
        .primary_board()
        .cloned()
        .expect("Fixture has a board")
}

pub(crate) fn mini_board() -> Board {
    Board::from_definition(&mini_definition()).expect("Fixture load failed")
}

pub(crate) fn mini_session() -> Session {
    PuzzleSetup::load(&mini_record())
        .expect("Fixture load failed")
        .session()
        .clone()
}

//! Tests for cursor navigation across whole boards.

use chrono::{DateTime, Utc};
use crossword_core::{
    Action, Board, BoardDefinition, ClueMoveOptions, Direction, Focus, MoveOptions, PuzzleInProgress,
    PuzzleRecord, PuzzleSetup, SessionStep, clue_complete,
};
use serde_json::json;

const MINI_JSON: &str = include_str!("fixtures/mini.json");

fn now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A single row of fillable cells forming one Across clue.
fn row_record(answers: &str) -> PuzzleRecord {
    let cells: Vec<_> = answers
        .chars()
        .map(|c| json!({"type": 1, "answer": c.to_string(), "clues": [0]}))
        .collect();
    let indices: Vec<usize> = (0..cells.len()).collect();
    serde_json::from_value(json!({
        "id": "row",
        "publicationDate": "2023-01-01",
        "body": [{
            "dimensions": {"width": cells.len(), "height": 1},
            "cells": cells,
            "clues": [{"cells": indices, "direction": "Across", "label": "1"}]
        }]
    }))
    .expect("Row record parses")
}

/// Three one-cell rows, each its own Across clue.
fn three_clue_record() -> PuzzleRecord {
    serde_json::from_value(json!({
        "id": "three",
        "publicationDate": "2023-01-01",
        "body": [{
            "dimensions": {"width": 1, "height": 3},
            "cells": [
                {"type": 1, "answer": "A", "clues": [0]},
                {"type": 1, "answer": "B", "clues": [1]},
                {"type": 1, "answer": "C", "clues": [2]}
            ],
            "clues": [
                {"cells": [0], "direction": "Across", "label": "1"},
                {"cells": [1], "direction": "Across", "label": "2"},
                {"cells": [2], "direction": "Across", "label": "3"}
            ]
        }]
    }))
    .expect("Three-clue record parses")
}

fn mini_record() -> PuzzleRecord {
    serde_json::from_str(MINI_JSON).expect("Fixture parses")
}

fn board_of(record: &PuzzleRecord) -> Board {
    let definition: &BoardDefinition = record.primary_board().expect("Record has a board");
    Board::from_definition(definition).expect("Board loads")
}

fn play(game: PuzzleInProgress, actions: &[Action]) -> PuzzleInProgress {
    actions.iter().fold(game, |game, action| {
        match game.apply(*action, now()).expect("Action applies") {
            SessionStep::InProgress { game, .. } => game,
            SessionStep::Solved { .. } => panic!("Unexpected solve"),
        }
    })
}

#[test]
fn test_step_forward_without_wrap() {
    let board = board_of(&row_record("AB"));
    let mut focus = Focus::new(0, Direction::Across);
    let options = MoveOptions {
        forward: true,
        wrap: false,
        skip_filled: false,
    };

    assert_eq!(focus.move_within_clue(&board, options), Ok(true));
    assert_eq!(focus.cell(), 1);

    // Already at the end; without wrap nothing happens.
    assert_eq!(focus.move_within_clue(&board, options), Ok(false));
    assert_eq!(focus.cell(), 1);
}

#[test]
fn test_next_clue_wraps_to_first() {
    let board = board_of(&three_clue_record());
    let mut focus = Focus::new(2, Direction::Across);
    let options = ClueMoveOptions {
        forward: true,
        skip_partial: false,
    };

    assert_eq!(focus.move_to_adjacent_clue(&board, options), Ok(true));
    assert_eq!(focus.cell(), 0);
    assert_eq!(*focus.resolve(&board).expect("Resolves").id(), 0);
}

#[test]
fn test_previous_clue_wraps_to_last() {
    let board = board_of(&three_clue_record());
    let mut focus = Focus::new(0, Direction::Across);
    let options = ClueMoveOptions {
        forward: false,
        skip_partial: false,
    };

    assert_eq!(focus.move_to_adjacent_clue(&board, options), Ok(true));
    assert_eq!(focus.cell(), 2);
}

#[test]
fn test_skip_partial_stays_put_before_started_clue() {
    let game = PuzzleSetup::load(&mini_record()).expect("Load").start(now());
    // Write into 3-Across (cell 7), then return to 1-Across.
    let game = play(
        game,
        &[Action::SelectCell(7), Action::Letter('g'), Action::SelectClue(0)],
    );
    let board = game.session().board();
    let mut focus = game.session().focus();
    assert_eq!(focus, Focus::new(0, Direction::Across));

    let options = ClueMoveOptions {
        forward: true,
        skip_partial: true,
    };
    assert_eq!(focus.move_to_adjacent_clue(board, options), Ok(false));
    assert_eq!(focus, Focus::new(0, Direction::Across));
}

#[test]
fn test_skip_partial_ignores_clue_being_left() {
    let game = PuzzleSetup::load(&mini_record()).expect("Load").start(now());
    // 1-Across is started; 3-Across is empty.
    let game = play(game, &[Action::Letter('a')]);
    let board = game.session().board();
    let mut focus = game.session().focus();

    let options = ClueMoveOptions {
        forward: true,
        skip_partial: true,
    };
    assert_eq!(focus.move_to_adjacent_clue(board, options), Ok(true));
    assert_eq!(focus, Focus::new(6, Direction::Across));
}

#[test]
fn test_cyclic_traversal_visits_each_cell_once() {
    let board = board_of(&mini_record());
    let options = MoveOptions {
        forward: true,
        wrap: true,
        skip_filled: false,
    };

    for clue in board.clues() {
        let mut focus = Focus::new(clue.first_cell(), *clue.direction());
        let mut visited = vec![focus.cell()];
        for _ in 1..clue.len() {
            focus.move_within_clue(&board, options).expect("Move");
            visited.push(focus.cell());
        }
        assert_eq!(&visited, clue.cells());

        focus.move_within_clue(&board, options).expect("Move");
        assert_eq!(focus.cell(), clue.first_cell());
    }
}

#[test]
fn test_skip_filled_lands_on_empty_cell() {
    const ANSWERS: &str = "ABCDE";
    let record = row_record(ANSWERS);

    for mask in 0u32..(1 << ANSWERS.len()) {
        let mut actions = Vec::new();
        for cell in (0..ANSWERS.len()).filter(|i| mask & (1 << i) != 0) {
            actions.push(Action::SelectCell(cell));
            actions.push(Action::Letter('z'));
        }
        let game = play(PuzzleSetup::load(&record).expect("Load").start(now()), &actions);
        let board = game.session().board();
        let clue = &board.clues()[0];

        for forward in [true, false] {
            for start in 0..ANSWERS.len() {
                let mut focus = Focus::new(start, Direction::Across);
                focus
                    .move_within_clue(
                        board,
                        MoveOptions {
                            forward,
                            wrap: true,
                            skip_filled: true,
                        },
                    )
                    .expect("Move");
                assert!(
                    clue_complete(clue, board) || !board.is_filled(focus.cell()),
                    "mask {mask:05b} start {start} landed on filled cell {}",
                    focus.cell()
                );
            }
        }
    }
}

#[test]
fn test_arrow_turns_then_moves() {
    let game = PuzzleSetup::load(&mini_record()).expect("Load").start(now());
    let game = play(
        game,
        &[
            Action::Arrow(crossword_core::ArrowKey::Down),
            Action::Arrow(crossword_core::ArrowKey::Down),
        ],
    );
    assert_eq!(game.session().focus(), Focus::new(3, Direction::Down));
}

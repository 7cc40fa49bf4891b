//! Tests for the typestate session and its action dispatcher.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use crossword_core::{
    Action, ActionError, AnyPuzzle, Letter, Notification, PuzzleInProgress, PuzzleRecord,
    PuzzleSetup, PuzzleSolved, SessionStep, clue_complete, puzzle_complete, puzzle_correct,
};
use serde_json::json;

const MINI_JSON: &str = include_str!("fixtures/mini.json");

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(seconds)
}

fn mini_record() -> PuzzleRecord {
    serde_json::from_str(MINI_JSON).expect("Fixture parses")
}

fn row_record(answers: &str) -> PuzzleRecord {
    let cells: Vec<_> = answers
        .chars()
        .map(|c| json!({"type": 1, "answer": c.to_string(), "clues": [0]}))
        .collect();
    let indices: Vec<usize> = (0..cells.len()).collect();
    serde_json::from_value(json!({
        "id": 7,
        "constructors": ["Ada"],
        "publicationDate": "2023-01-01",
        "body": [{
            "dimensions": {"width": cells.len(), "height": 1},
            "cells": cells,
            "clues": [{"cells": indices, "direction": "Across", "label": "1"}]
        }]
    }))
    .expect("Row record parses")
}

fn start(record: &PuzzleRecord) -> PuzzleInProgress {
    PuzzleSetup::load(record).expect("Load").start(at(0))
}

/// Applies `action`, expecting the puzzle to stay in progress.
fn step(game: PuzzleInProgress, action: Action) -> (PuzzleInProgress, Vec<Notification>) {
    match game.apply(action, at(1)).expect("Action applies") {
        SessionStep::InProgress {
            game,
            notifications,
        } => (game, notifications),
        SessionStep::Solved { .. } => panic!("Unexpected solve"),
    }
}

/// Applies `action`, expecting it to solve the puzzle.
fn solve(game: PuzzleInProgress, action: Action, now: DateTime<Utc>) -> (PuzzleSolved, Vec<Notification>) {
    match game.apply(action, now).expect("Action applies") {
        SessionStep::Solved {
            game,
            notifications,
        } => (game, notifications),
        SessionStep::InProgress { .. } => panic!("Expected solve"),
    }
}

#[test]
fn test_filled_clue_is_complete() {
    let game = start(&row_record("AB"));
    let (game, _) = step(game, Action::Letter('x'));
    let board = game.session().board();
    assert!(!clue_complete(&board.clues()[0], board));

    let (game, notifications) = step(game, Action::Letter('y'));
    let board = game.session().board();
    assert!(clue_complete(&board.clues()[0], board));
    assert!(notifications.contains(&Notification::ClueCompleted { clue: 0 }));
}

#[test]
fn test_lowercase_entry_solves() {
    let game = start(&row_record("A"));
    let (solved, notifications) = solve(game, Action::Letter('a'), at(42));

    let board = solved.session().board();
    assert!(puzzle_correct(board));
    assert!(puzzle_complete(board));
    assert_eq!(board.guess(0).map(Letter::as_char), Some('A'));
    assert_eq!(solved.duration(), Duration::from_secs(42));
    assert_eq!(
        notifications.last(),
        Some(&Notification::Solved {
            duration: Duration::from_secs(42)
        })
    );
}

#[test]
fn test_guess_reads_back_uppercase() {
    let game = start(&mini_record());
    let (game, notifications) = step(game, Action::Letter('a'));
    assert_eq!(game.session().board().guess(0), Letter::new('A'));
    assert!(notifications.contains(&Notification::GuessChanged {
        cell: 0,
        guess: Letter::new('A')
    }));
}

#[test]
fn test_guess_slots_match_cells() {
    let game = start(&mini_record());
    let cells = game.session().board().cells().len();
    let mut game = game;
    for c in "qwertyu".chars() {
        let (next, _) = step(game, Action::Letter(c));
        game = next;
        assert_eq!(game.session().board().guesses().len(), cells);
    }
    let (game, _) = step(game, Action::Backspace);
    assert_eq!(game.session().board().guesses().len(), cells);
}

#[test]
fn test_clue_completion_holds_until_cleared() {
    let game = start(&mini_record());
    let (game, _) = step(game, Action::Letter('a'));
    let (game, _) = step(game, Action::Letter('b'));
    let (game, _) = step(game, Action::Letter('c'));
    assert!(clue_complete(&game.session().board().clues()[0], game.session().board()));

    // More letters elsewhere keep 1-Across complete.
    let (game, _) = step(game, Action::Letter('f'));
    let (game, _) = step(game, Action::Letter('g'));
    assert!(clue_complete(&game.session().board().clues()[0], game.session().board()));

    // Clearing a cell of 1-Across undoes it.
    let (game, _) = step(game, Action::SelectCell(1));
    let (game, notifications) = step(game, Action::Backspace);
    assert!(!clue_complete(&game.session().board().clues()[0], game.session().board()));
    assert!(notifications.contains(&Notification::ClueIncomplete { clue: 0 }));
}

#[test]
fn test_incorrect_fill_reported_once() {
    let game = start(&row_record("ABC"));
    let (game, _) = step(game, Action::Letter('x'));
    let (game, _) = step(game, Action::Letter('y'));
    let (game, notifications) = step(game, Action::Letter('z'));
    assert!(notifications.contains(&Notification::IncorrectFill));
    assert!(game.session().incorrect_notified());

    // Overwriting while still full and wrong stays quiet.
    let (game, _) = step(game, Action::SelectCell(1));
    let (game, notifications) = step(game, Action::Letter('q'));
    assert!(!notifications.contains(&Notification::IncorrectFill));

    // Backspace re-arms the warning.
    let (game, _) = step(game, Action::SelectCell(2));
    let (game, _) = step(game, Action::Backspace);
    assert!(!game.session().incorrect_notified());
    let (game, _) = step(game, Action::SelectCell(2));
    let (_, notifications) = step(game, Action::Letter('w'));
    assert!(notifications.contains(&Notification::IncorrectFill));
}

#[test]
fn test_solved_puzzle_rejects_edits() {
    let game = start(&row_record("A"));
    let (mut solved, _) = solve(game, Action::Letter('a'), at(5));

    assert_eq!(
        solved.navigate(Action::Letter('b')),
        Err(ActionError::PuzzleSolved)
    );
    assert_eq!(solved.navigate(Action::Backspace), Err(ActionError::PuzzleSolved));
    assert_eq!(solved.navigate(Action::Pause), Err(ActionError::PuzzleSolved));
    assert_eq!(solved.navigate(Action::NextClue), Ok(Vec::new()));
    assert_eq!(solved.session().board().guess(0), Letter::new('A'));
}

#[test]
fn test_pause_excludes_time() {
    let game = start(&row_record("AB"));
    let step_at = |game: PuzzleInProgress, action, seconds| match game
        .apply(action, at(seconds))
        .expect("Action applies")
    {
        SessionStep::InProgress { game, .. } => game,
        SessionStep::Solved { .. } => panic!("Unexpected solve"),
    };

    let game = step_at(game, Action::Letter('a'), 10);
    let game = step_at(game, Action::Pause, 20);
    assert_eq!(game.elapsed(at(500)), Duration::from_secs(20));
    assert!(matches!(
        game.clone().apply(Action::Letter('b'), at(30)),
        Err(ActionError::Paused)
    ));

    let game = step_at(game, Action::Resume, 100);
    let (solved, _) = solve(game, Action::Letter('b'), at(115));
    assert_eq!(solved.duration(), Duration::from_secs(35));
}

#[test]
fn test_score_and_summary() {
    let game = start(&row_record("A"));
    let (solved, _) = solve(game, Action::Letter('A'), at(75));

    let score = solved.score();
    assert_eq!(score.id(), "7");
    assert_eq!(*score.duration(), 75_000);
    assert_eq!(*score.timestamp(), 75_000);

    let summary = solved.summary().expect("Summary builds");
    assert_eq!(
        summary.alt(),
        "I finished this crossword in 1:15 on Sunday, January 1, 2023"
    );
}

#[test]
fn test_rejected_action_reports_error() {
    let game = start(&mini_record());
    assert!(matches!(
        game.clone().apply(Action::SelectCell(4), at(1)),
        Err(ActionError::NotFillable(4))
    ));
    assert!(matches!(
        game.apply(Action::Letter('#'), at(1)),
        Err(ActionError::InvalidLetter('#'))
    ));
}

#[test]
fn test_any_puzzle_tracks_phase() {
    let game = start(&row_record("A"));
    let step = game.apply(Action::Letter('a'), at(3)).expect("Action applies");
    let any = AnyPuzzle::from(step);
    assert_eq!(any.phase(), "solved");
    assert_eq!(any.session().board().guess(0), Letter::new('A'));
}

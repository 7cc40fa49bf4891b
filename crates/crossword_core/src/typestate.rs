//! Phase-specific typestate structs for a crossword session.
//!
//! A puzzle moves through setup (loaded, timer idle), in progress
//! (accepting actions) and solved (timer stopped, guesses frozen). Each
//! phase is its own type, so a solved puzzle always has a duration and an
//! in-progress puzzle can never be scored.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::action::{Action, ActionError};
use crate::board::Board;
use crate::contracts::{ActionContract, Contract};
use crate::error::PuzzleError;
use crate::focus::{ClueMoveOptions, Focus, MoveOptions};
use crate::notification::Notification;
use crate::record::{PuzzleInfo, PuzzleRecord, ScoreRecord};
use crate::rules::{clue_complete, puzzle_complete, puzzle_correct};
use crate::summary::{self, Summary, SummaryError};
use crate::timing::{TimerState, Timing};
use crate::types::{Clue, Letter};

// ─────────────────────────────────────────────────────────────
//  Session state
// ─────────────────────────────────────────────────────────────

/// Everything a session owns: the board, the cursor and the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) info: PuzzleInfo,
    pub(crate) board: Board,
    pub(crate) focus: Focus,
    pub(crate) timing: Timing,
    pub(crate) incorrect_notified: bool,
}

impl Session {
    /// Puzzle metadata.
    pub fn info(&self) -> &PuzzleInfo {
        &self.info
    }

    /// The board with current guesses.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The cursor.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The solve timer.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The clue under the cursor.
    pub fn active_clue(&self) -> Option<&Clue> {
        self.board.clue_for(self.focus.cell(), self.focus.direction())
    }

    /// Returns true once a full but wrong grid has been reported.
    pub fn incorrect_notified(&self) -> bool {
        self.incorrect_notified
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle loaded and waiting for the player to start.
///
/// Guesses are empty and the timer is idle.
#[derive(Debug, Clone)]
pub struct PuzzleSetup {
    session: Session,
}

impl PuzzleSetup {
    /// Validates a stored record and prepares a session for its first board.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the record has no board or the board is
    /// malformed.
    #[instrument(skip(record), fields(id = %record.id()))]
    pub fn load(record: &PuzzleRecord) -> Result<Self, PuzzleError> {
        let definition = record.primary_board().ok_or(PuzzleError::EmptyBody)?;
        let board = Board::from_definition(definition)?;
        let focus = Focus::initial(&board).ok_or(PuzzleError::NoClues)?;

        info!(
            cells = board.cells().len(),
            clues = board.clues().len(),
            "Puzzle loaded"
        );

        Ok(Self {
            session: Session {
                info: record.info(),
                board,
                focus,
                timing: Timing::new(),
                incorrect_notified: false,
            },
        })
    }

    /// Session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Starts the timer (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self, now: DateTime<Utc>) -> PuzzleInProgress {
        let mut session = self.session;
        session.timing = Timing::started_at(now);
        PuzzleInProgress { session }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle in progress; accepts actions.
#[derive(Debug, Clone)]
pub struct PuzzleInProgress {
    pub(crate) session: Session,
}

impl PuzzleInProgress {
    /// Applies an action, consuming self and transitioning to the next state.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self), fields(focus = ?self.session.focus))]
    pub fn apply(self, action: Action, now: DateTime<Utc>) -> Result<SessionStep, ActionError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        ActionContract::pre(&self, &action)?;

        let mut game = self;
        let focus_before = game.session.focus;
        let mut notifications = Vec::new();

        let solved = match action {
            Action::Letter(c) => game.enter_letter(c, now, &mut notifications)?,
            Action::Backspace => {
                game.backspace(&mut notifications)?;
                None
            }
            Action::Pause => {
                game.session.timing.pause(now)?;
                notifications.push(Notification::Paused);
                None
            }
            Action::Resume => {
                game.session.timing.start(now)?;
                notifications.push(Notification::Resumed);
                None
            }
            navigation => {
                navigate(&mut game.session, navigation)?;
                None
            }
        };

        push_focus_change(&game.session, focus_before, &mut notifications)?;

        if let Some(duration) = solved {
            notifications.push(Notification::Solved { duration });
            return Ok(SessionStep::Solved {
                game: PuzzleSolved {
                    session: game.session,
                    duration,
                    solved_at: now,
                },
                notifications,
            });
        }

        #[cfg(debug_assertions)]
        ActionContract::post(&before, &game)?;

        Ok(SessionStep::InProgress {
            game,
            notifications,
        })
    }

    /// Session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Solve time so far, for the running clock.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.session.timing.elapsed(now)
    }

    /// Returns true while the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.session.timing.state() == TimerState::Paused
    }

    /// Writes a guess and advances the cursor. Returns the final duration
    /// when the guess solves the puzzle.
    fn enter_letter(
        &mut self,
        c: char,
        now: DateTime<Utc>,
        notifications: &mut Vec<Notification>,
    ) -> Result<Option<Duration>, ActionError> {
        let letter = Letter::new(c).ok_or(ActionError::InvalidLetter(c))?;
        let session = &mut self.session;
        let cell = session.focus.cell();

        session.board.set_guess(cell, Some(letter))?;
        notifications.push(Notification::GuessChanged {
            cell,
            guess: Some(letter),
        });
        for clue in session.board.clues_of(cell) {
            if clue_complete(clue, &session.board) {
                notifications.push(Notification::ClueCompleted { clue: *clue.id() });
            }
        }

        let mut solved = None;
        if puzzle_correct(&session.board) {
            let duration = session.timing.stop(now)?;
            info!(
                id = %session.info.id(),
                duration_ms = duration.as_millis() as u64,
                "Puzzle solved"
            );
            solved = Some(duration);
        } else if puzzle_complete(&session.board) && !session.incorrect_notified {
            debug!("Grid full but incorrect");
            session.incorrect_notified = true;
            notifications.push(Notification::IncorrectFill);
        }

        let active_complete = clue_complete(session.focus.resolve(&session.board)?, &session.board);
        if active_complete {
            session.focus.move_to_adjacent_clue(
                &session.board,
                ClueMoveOptions {
                    forward: true,
                    skip_partial: true,
                },
            )?;
        } else {
            session.focus.move_within_clue(
                &session.board,
                MoveOptions {
                    forward: true,
                    wrap: true,
                    skip_filled: true,
                },
            )?;
        }

        Ok(solved)
    }

    /// Clears the focused cell and steps back without wrapping.
    fn backspace(&mut self, notifications: &mut Vec<Notification>) -> Result<(), ActionError> {
        let session = &mut self.session;
        let cell = session.focus.cell();

        session.board.set_guess(cell, None)?;
        notifications.push(Notification::GuessChanged { cell, guess: None });
        for clue in session.board.clues_of(cell) {
            notifications.push(Notification::ClueIncomplete { clue: *clue.id() });
        }
        session.incorrect_notified = false;

        session.focus.move_within_clue(
            &session.board,
            MoveOptions {
                forward: false,
                wrap: false,
                skip_filled: false,
            },
        )?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Solved Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle solved; the timer is stopped and guesses are frozen.
///
/// The duration is always present. The cursor can still move around the
/// finished grid.
#[derive(Debug, Clone)]
pub struct PuzzleSolved {
    session: Session,
    duration: Duration,
    solved_at: DateTime<Utc>,
}

impl PuzzleSolved {
    /// Session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Final solve time.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// When the final letter went in.
    pub fn solved_at(&self) -> DateTime<Utc> {
        self.solved_at
    }

    /// Moves the cursor. Edits and timer actions are rejected.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, action: Action) -> Result<Vec<Notification>, ActionError> {
        if !action.is_navigation() {
            return Err(ActionError::PuzzleSolved);
        }
        let focus_before = self.session.focus;
        navigate(&mut self.session, action)?;

        let mut notifications = Vec::new();
        push_focus_change(&self.session, focus_before, &mut notifications)?;
        Ok(notifications)
    }

    /// Completion record for the score store.
    pub fn score(&self) -> ScoreRecord {
        ScoreRecord::new(
            self.session.info.id().clone(),
            self.duration.as_millis() as u64,
            self.solved_at.timestamp_millis(),
        )
    }

    /// Shareable completion card.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] if the publication date does not parse.
    pub fn summary(&self) -> Result<Summary, SummaryError> {
        summary::generate(self.session.info.publication_date(), self.duration)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Types
// ─────────────────────────────────────────────────────────────

/// Result of applying an action.
#[derive(Debug)]
pub enum SessionStep {
    /// Puzzle continues.
    InProgress {
        /// Next state.
        game: PuzzleInProgress,
        /// Changes to render.
        notifications: Vec<Notification>,
    },
    /// Puzzle solved by this action.
    Solved {
        /// Final state.
        game: PuzzleSolved,
        /// Changes to render, ending with [`Notification::Solved`].
        notifications: Vec<Notification>,
    },
}

impl SessionStep {
    /// Notifications emitted by the step.
    pub fn notifications(&self) -> &[Notification] {
        match self {
            SessionStep::InProgress { notifications, .. }
            | SessionStep::Solved { notifications, .. } => notifications,
        }
    }
}

/// A session in any phase.
#[derive(Debug, Clone)]
pub enum AnyPuzzle {
    /// Waiting to start.
    Setup(PuzzleSetup),
    /// Being solved.
    InProgress(PuzzleInProgress),
    /// Solved.
    Solved(PuzzleSolved),
}

impl AnyPuzzle {
    /// Session state, whatever the phase.
    pub fn session(&self) -> &Session {
        match self {
            AnyPuzzle::Setup(game) => game.session(),
            AnyPuzzle::InProgress(game) => game.session(),
            AnyPuzzle::Solved(game) => game.session(),
        }
    }

    /// Phase name for logs and the status bar.
    pub fn phase(&self) -> &'static str {
        match self {
            AnyPuzzle::Setup(_) => "setup",
            AnyPuzzle::InProgress(game) if game.is_paused() => "paused",
            AnyPuzzle::InProgress(_) => "in progress",
            AnyPuzzle::Solved(_) => "solved",
        }
    }
}

impl From<PuzzleSetup> for AnyPuzzle {
    fn from(game: PuzzleSetup) -> Self {
        AnyPuzzle::Setup(game)
    }
}

impl From<PuzzleInProgress> for AnyPuzzle {
    fn from(game: PuzzleInProgress) -> Self {
        AnyPuzzle::InProgress(game)
    }
}

impl From<PuzzleSolved> for AnyPuzzle {
    fn from(game: PuzzleSolved) -> Self {
        AnyPuzzle::Solved(game)
    }
}

impl From<SessionStep> for AnyPuzzle {
    fn from(step: SessionStep) -> Self {
        match step {
            SessionStep::InProgress { game, .. } => game.into(),
            SessionStep::Solved { game, .. } => game.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Shared helpers
// ─────────────────────────────────────────────────────────────

/// Applies a navigation action to the cursor. Other actions are left to
/// the caller.
fn navigate(session: &mut Session, action: Action) -> Result<(), ActionError> {
    let board = &session.board;
    let focus = &mut session.focus;
    match action {
        Action::NextClue | Action::PreviousClue => {
            focus.move_to_adjacent_clue(
                board,
                ClueMoveOptions {
                    forward: action == Action::NextClue,
                    skip_partial: false,
                },
            )?;
        }
        Action::Arrow(key) => {
            focus.arrow(board, key)?;
        }
        Action::SelectCell(cell) if cell == focus.cell() => {
            focus.toggle_direction(board);
        }
        Action::SelectCell(cell) => {
            focus.select_cell(board, cell)?;
        }
        Action::SelectClue(clue) => {
            focus.select_clue(board, clue)?;
        }
        Action::Letter(_) | Action::Backspace | Action::Pause | Action::Resume => {}
    }
    Ok(())
}

fn push_focus_change(
    session: &Session,
    before: Focus,
    notifications: &mut Vec<Notification>,
) -> Result<(), ActionError> {
    if session.focus != before {
        let clue = session.focus.resolve(&session.board)?;
        notifications.push(Notification::FocusChanged {
            cell: session.focus.cell(),
            clue: *clue.id(),
        });
    }
    Ok(())
}

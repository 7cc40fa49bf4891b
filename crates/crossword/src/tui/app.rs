//! Application state and input handling for the puzzle screen.

use chrono::{DateTime, Utc};
use crossword_core::{Action, AnyPuzzle, format_clock};
use tracing::{debug, error, info, instrument, warn};

use super::input::Input;
use super::view::{BoardView, Dialog};
use crate::session::{GameSession, SessionEvent};

/// Main application state.
pub struct App {
    session: GameSession,
    view: BoardView,
    quit: bool,
}

impl App {
    /// Creates the app with the start dialog open.
    pub fn new(session: GameSession) -> Self {
        let view = BoardView::new(session.game().session());
        Self {
            session,
            view,
            quit: false,
        }
    }

    /// The render state.
    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// The render state, for recording click targets while drawing.
    pub fn view_mut(&mut self) -> &mut BoardView {
        &mut self.view
    }

    /// The game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns true once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Clock text for the grid title.
    pub fn clock(&self, now: DateTime<Utc>) -> String {
        format_clock(self.session.elapsed(now))
    }

    /// Handles one mapped key press.
    #[instrument(skip(self))]
    pub fn handle_input(&mut self, input: Input, now: DateTime<Utc>) {
        let confirm = matches!(
            input,
            Input::Confirm | Input::TogglePause | Input::Act(Action::NextClue)
        );

        match (self.view.dialog().clone(), input) {
            (_, Input::Quit) => {
                info!("User quit");
                self.quit = true;
            }
            (Some(Dialog::Start), _) => self.start(now),
            (Some(Dialog::Paused), _) if confirm => self.dispatch(Action::Resume, now),
            (Some(Dialog::Paused), _) => {}
            (Some(Dialog::Solved { .. }), Input::Share) => self.share(),
            (Some(_), _) if confirm => self.view.close_dialog(),
            (Some(_), _) => {}
            (None, Input::TogglePause) => {
                if matches!(self.session.game(), AnyPuzzle::InProgress(_)) {
                    self.dispatch(Action::Pause, now);
                }
            }
            (None, Input::Share) => self.share(),
            (None, Input::Confirm) => {}
            (None, Input::Act(action)) => self.dispatch(action, now),
        }
    }

    /// Handles a left click at a terminal position.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, column: u16, row: u16, now: DateTime<Utc>) {
        match self.view.dialog() {
            Some(Dialog::Start) => self.start(now),
            Some(_) => {}
            None => {
                if let Some(action) = self.view.hit(column, row) {
                    self.dispatch(action, now);
                }
            }
        }
    }

    /// Handles a finished background task.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ScoreSaved { .. } => self.view.set_status("Score saved"),
            SessionEvent::ScoreFailed { message, .. } => {
                warn!(%message, "Score not saved");
                self.view.set_status(format!("Score not saved: {}", message));
            }
        }
    }

    /// Drains finished background tasks.
    pub fn poll_session_events(&mut self) {
        while let Some(event) = self.session.poll_event() {
            self.handle_session_event(event);
        }
    }

    fn start(&mut self, now: DateTime<Utc>) {
        if self.session.start(now) {
            self.view.set_status("Timer started");
        }
        self.view.close_dialog();
    }

    fn dispatch(&mut self, action: Action, now: DateTime<Utc>) {
        match self.session.dispatch(action, now) {
            Ok(notifications) => {
                for notification in &notifications {
                    self.view.apply(notification);
                }
                if let AnyPuzzle::Solved(game) = self.session.game()
                    && self.view.solved().is_some()
                    && matches!(self.view.dialog(), Some(Dialog::Solved { share: None, .. }))
                {
                    match game.summary() {
                        Ok(summary) => self.view.set_share_text(summary.alt().clone()),
                        Err(e) => debug!(error = %e, "Share unavailable"),
                    }
                }
                self.view.set_status("");
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Game state error");
                self.view.show_error(e.to_string());
            }
            Err(e) => {
                debug!(error = %e, "Action rejected");
                self.view.set_status(e.to_string());
            }
        }
    }

    fn share(&mut self) {
        match self.session.share() {
            Some(path) => self.view.set_status(format!("Saved {}", path.display())),
            None => debug!("Nothing shared"),
        }
    }
}

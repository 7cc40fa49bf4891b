//! A single play-through of a stored puzzle.
//!
//! [`GameSession`] owns the typestate game and talks to the store. Score
//! writes run on spawned tasks and report back over a channel, so input
//! handling never waits on the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossword_core::{
    Action, ActionError, AnyPuzzle, Notification, PuzzleError, PuzzleSetup, ScoreRecord,
    SessionStep,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::store::{PuzzleStore, StoreError};

/// Background results delivered to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The score was stored.
    ScoreSaved {
        /// Puzzle id.
        id: String,
    },
    /// The score write failed; the solved state is kept.
    ScoreFailed {
        /// Puzzle id.
        id: String,
        /// Store error text.
        message: String,
    },
}

/// Why a puzzle could not be opened for play.
#[derive(Debug, derive_more::Display)]
pub enum LoadError {
    /// No puzzle with that id.
    #[display("Puzzle '{}' not found", _0)]
    NotFound(String),

    /// The store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// The stored puzzle does not load.
    #[display("Puzzle '{}' is malformed: {}", id, source)]
    Malformed {
        /// Puzzle id.
        id: String,
        /// Validation failure.
        source: PuzzleError,
    },
}

impl std::error::Error for LoadError {}

/// Game state plus its store connection.
pub struct GameSession {
    id: String,
    game: AnyPuzzle,
    store: Arc<dyn PuzzleStore>,
    share_dir: PathBuf,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl GameSession {
    /// Fetches and validates a puzzle, leaving it in the setup phase.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the puzzle is missing, the store fails or
    /// the record is malformed.
    #[instrument(skip(store, share_dir))]
    pub async fn load(
        store: Arc<dyn PuzzleStore>,
        id: &str,
        share_dir: impl Into<PathBuf>,
    ) -> Result<Self, LoadError> {
        let record = store.get_puzzle(id).await.map_err(|e| {
            if e.is_not_found() {
                LoadError::NotFound(id.to_string())
            } else {
                LoadError::Store(e)
            }
        })?;

        let setup = PuzzleSetup::load(&record).map_err(|source| LoadError::Malformed {
            id: id.to_string(),
            source,
        })?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        info!(id, "Session ready");
        Ok(Self {
            id: id.to_string(),
            game: setup.into(),
            store,
            share_dir: share_dir.into(),
            events_tx,
            events_rx,
        })
    }

    /// Puzzle id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current game, in whatever phase.
    pub fn game(&self) -> &AnyPuzzle {
        &self.game
    }

    /// Returns true once the puzzle is solved.
    pub fn is_solved(&self) -> bool {
        matches!(self.game, AnyPuzzle::Solved(_))
    }

    /// Starts the timer. Returns false if the game already started.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        let AnyPuzzle::Setup(setup) = &self.game else {
            return false;
        };
        self.game = setup.clone().start(now).into();
        info!("Timer started");
        true
    }

    /// Time shown on the clock.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match &self.game {
            AnyPuzzle::Setup(_) => Duration::ZERO,
            AnyPuzzle::InProgress(game) => game.elapsed(now),
            AnyPuzzle::Solved(game) => game.duration(),
        }
    }

    /// Applies one input action.
    ///
    /// A rejected action leaves the game as it was. Solving the puzzle
    /// queues the score write.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] from the game.
    #[instrument(skip(self), fields(id = %self.id, phase = self.game.phase()))]
    pub fn dispatch(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, ActionError> {
        match &mut self.game {
            AnyPuzzle::Setup(_) => {
                debug!("Ignoring action before start");
                Ok(Vec::new())
            }
            AnyPuzzle::Solved(game) => game.navigate(action),
            AnyPuzzle::InProgress(game) => match game.clone().apply(action, now) {
                Ok(SessionStep::InProgress {
                    game,
                    notifications,
                }) => {
                    self.game = game.into();
                    Ok(notifications)
                }
                Ok(SessionStep::Solved {
                    game,
                    notifications,
                }) => {
                    self.save_score(game.score());
                    self.game = game.into();
                    Ok(notifications)
                }
                Err(e) => {
                    if e.is_fatal() {
                        error!(error = %e, "Session invariant broken");
                    } else {
                        debug!(error = %e, "Action rejected");
                    }
                    Err(e)
                }
            },
        }
    }

    /// Writes the score on a background task.
    fn save_score(&self, score: ScoreRecord) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let id = score.id().clone();
            let event = match store.put_score(score).await {
                Ok(()) => {
                    info!(id = %id, "Score saved");
                    SessionEvent::ScoreSaved { id }
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Score write failed");
                    SessionEvent::ScoreFailed {
                        id,
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    /// Returns a finished background result, if any.
    pub fn poll_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Waits for the next background result.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    /// Writes the completion card to the share directory.
    ///
    /// Returns the file written. Failures are logged at debug level and
    /// otherwise ignored.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn share(&self) -> Option<PathBuf> {
        let AnyPuzzle::Solved(game) = &self.game else {
            return None;
        };
        let summary = match game.summary() {
            Ok(summary) => summary,
            Err(e) => {
                debug!(error = %e, "No summary to share");
                return None;
            }
        };

        let path = self.share_dir.join(format!("{}.svg", sanitize(&self.id)));
        match write_card(&self.share_dir, &path, summary.svg()) {
            Ok(()) => {
                info!(path = %path.display(), alt = %summary.alt(), "Summary shared");
                Some(path)
            }
            Err(e) => {
                debug!(error = %e, path = %path.display(), "Share failed");
                None
            }
        }
    }
}

fn write_card(dir: &Path, path: &Path, svg: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(path, svg)
}

/// Keeps ids usable as file names.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

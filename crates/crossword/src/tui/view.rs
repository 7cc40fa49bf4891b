//! Screen-side state for the puzzle, kept in sync by notifications.
//!
//! The view is seeded once from the session and afterwards changes only
//! through [`BoardView::apply`]. It also remembers where cells and clues
//! were drawn so mouse clicks can be turned back into actions.

use std::time::Duration;

use crossword_core::{
    Action, CellIndex, ClueId, Direction, Notification, Session, byline, format_finish_time,
    format_publication_date, parse_publication_date,
};
use derive_getters::Getters;
use ratatui::layout::Rect;
use tracing::debug;

/// Columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 4;
/// Rows used to draw one grid cell.
pub const CELL_HEIGHT: u16 = 2;

/// One grid square as shown.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CellView {
    block: bool,
    label: Option<String>,
    guess: Option<char>,
}

/// One clue as shown.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ClueView {
    id: ClueId,
    label: String,
    direction: Direction,
    text: String,
    cells: Vec<CellIndex>,
    complete: bool,
}

/// A titled column of clues.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ClueGroup {
    name: String,
    clues: Vec<ClueId>,
}

/// Modal overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Waiting for the player to begin.
    Start,
    /// Timer paused; the grid is hidden.
    Paused,
    /// Grid full but wrong.
    Incorrect,
    /// Puzzle solved.
    Solved {
        /// Finish time, e.g. "1:15".
        time: String,
        /// Share text, if a card can be made.
        share: Option<String>,
    },
    /// Unexpected failure.
    Error(String),
}

#[derive(Debug, Clone, Default)]
struct HitMap {
    grid: Option<Rect>,
    clues: Vec<(Rect, ClueId)>,
}

/// Render state for the puzzle screen.
#[derive(Debug, Clone, Getters)]
pub struct BoardView {
    title: String,
    byline: String,
    width: usize,
    height: usize,
    cells: Vec<CellView>,
    clues: Vec<ClueView>,
    groups: Vec<ClueGroup>,
    focus_cell: CellIndex,
    active_clue: ClueId,
    paused: bool,
    solved: Option<Duration>,
    dialog: Option<Dialog>,
    status: String,
    #[getter(skip)]
    hits: HitMap,
}

impl BoardView {
    /// Seeds the view from a freshly loaded session.
    pub fn new(session: &Session) -> Self {
        let board = session.board();
        let info = session.info();

        let cells = board
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| CellView {
                block: !cell.is_fillable(),
                label: cell.label().clone(),
                guess: board.guess(index).map(|letter| letter.as_char()),
            })
            .collect();

        let clues: Vec<ClueView> = board
            .clues()
            .iter()
            .map(|clue| ClueView {
                id: *clue.id(),
                label: clue.label().clone(),
                direction: *clue.direction(),
                text: clue.plain_text(),
                cells: clue.cells().clone(),
                complete: clue.cells().iter().all(|&cell| board.is_filled(cell)),
            })
            .collect();

        let groups = if board.clue_lists().is_empty() {
            [Direction::Across, Direction::Down]
                .into_iter()
                .map(|direction| ClueGroup {
                    name: direction.to_string(),
                    clues: clues
                        .iter()
                        .filter(|clue| clue.direction == direction)
                        .map(|clue| clue.id)
                        .collect(),
                })
                .collect()
        } else {
            board
                .clue_lists()
                .iter()
                .map(|list| ClueGroup {
                    name: list.name().clone(),
                    clues: list.clues().clone(),
                })
                .collect()
        };

        let title = match parse_publication_date(info.publication_date()) {
            Ok(date) => format!("Crossword for {}", format_publication_date(date)),
            Err(_) => format!("Crossword for {}", info.publication_date()),
        };

        let focus = session.focus();
        let active_clue = session.active_clue().map(|clue| *clue.id()).unwrap_or_default();
        let dimensions = board.dimensions();

        Self {
            title,
            byline: byline(info.constructors(), info.editor().as_deref()),
            width: dimensions.width,
            height: dimensions.height,
            cells,
            clues,
            groups,
            focus_cell: focus.cell(),
            active_clue,
            paused: false,
            solved: None,
            dialog: Some(Dialog::Start),
            status: String::new(),
            hits: HitMap::default(),
        }
    }

    /// Applies one change from the session.
    pub fn apply(&mut self, notification: &Notification) {
        debug!(?notification, "View update");
        match *notification {
            Notification::GuessChanged { cell, guess } => {
                if let Some(view) = self.cells.get_mut(cell) {
                    view.guess = guess.map(|letter| letter.as_char());
                }
            }
            Notification::ClueCompleted { clue } => self.mark_clue(clue, true),
            Notification::ClueIncomplete { clue } => self.mark_clue(clue, false),
            Notification::FocusChanged { cell, clue } => {
                self.focus_cell = cell;
                self.active_clue = clue;
            }
            Notification::IncorrectFill => {
                self.dialog = Some(Dialog::Incorrect);
            }
            Notification::Paused => {
                self.paused = true;
                self.dialog = Some(Dialog::Paused);
            }
            Notification::Resumed => {
                self.paused = false;
                if self.dialog == Some(Dialog::Paused) {
                    self.dialog = None;
                }
            }
            Notification::Solved { duration } => {
                self.solved = Some(duration);
                self.dialog = Some(Dialog::Solved {
                    time: format_finish_time(duration),
                    share: None,
                });
            }
        }
    }

    fn mark_clue(&mut self, clue: ClueId, complete: bool) {
        if let Some(view) = self.clues.get_mut(clue) {
            view.complete = complete;
        }
    }

    /// Attaches share text to the solved dialog.
    pub fn set_share_text(&mut self, text: String) {
        if let Some(Dialog::Solved { share, .. }) = &mut self.dialog {
            *share = Some(text);
        }
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Shows an error dialog.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog::Error(message.into()));
    }

    /// Closes any dialog.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// The clue under the cursor.
    pub fn active(&self) -> Option<&ClueView> {
        self.clues.get(self.active_clue)
    }

    /// Returns true if `cell` belongs to the active clue.
    pub fn in_active_clue(&self, cell: CellIndex) -> bool {
        self.active().is_some_and(|clue| clue.cells.contains(&cell))
    }

    /// Remembers where the grid was drawn (inner area, top-left cell first).
    pub fn record_grid(&mut self, area: Rect) {
        self.hits.grid = Some(area);
    }

    /// Forgets previously drawn clue lines.
    pub fn clear_clue_hits(&mut self) {
        self.hits.clues.clear();
    }

    /// Remembers where a clue line was drawn.
    pub fn record_clue(&mut self, area: Rect, clue: ClueId) {
        self.hits.clues.push((area, clue));
    }

    /// Turns a click position into an action.
    pub fn hit(&self, column: u16, row: u16) -> Option<Action> {
        if let Some(cell) = self.cell_at(column, row) {
            return Some(Action::SelectCell(cell));
        }
        self.hits
            .clues
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, clue)| Action::SelectClue(*clue))
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<CellIndex> {
        let grid = self.hits.grid?;
        if !contains(grid, column, row) {
            return None;
        }
        let col = usize::from((column - grid.x) / CELL_WIDTH);
        let line = usize::from((row - grid.y) / CELL_HEIGHT);
        if col >= self.width || line >= self.height {
            return None;
        }
        let index = line * self.width + col;
        self.cells
            .get(index)
            .filter(|cell| !cell.block)
            .map(|_| index)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

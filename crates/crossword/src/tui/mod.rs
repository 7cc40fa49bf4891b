//! Terminal UI for solving a puzzle.

mod app;
mod input;
mod ui;
mod view;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::config::CrosswordConfig;
use crate::session::{GameSession, LoadError};
use crate::store::PuzzleStore;

use app::App;
use input::map_key;

/// Loads a puzzle and runs the terminal UI until the player quits.
///
/// A missing puzzle prints a message and returns normally; any other load
/// failure is an error.
pub async fn run_tui(config: &CrosswordConfig, store: Arc<dyn PuzzleStore>, id: &str) -> Result<()> {
    // Log to a file so output never corrupts the screen
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,crossword=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(id, "Starting crossword TUI");

    let session = match GameSession::load(store, id, config.share_dir().clone()).await {
        Ok(session) => session,
        Err(LoadError::NotFound(id)) => {
            eprintln!("Puzzle '{}' not found. Run `crossword list` to see stored puzzles.", id);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load puzzle"),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = run_app(&mut terminal, &mut app, config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, poll, dispatch until the player quits.
#[instrument(skip_all, fields(id = %app.session().id()))]
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &CrosswordConfig,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    let tick = config.tick();

    loop {
        app.poll_session_events();

        let clock = app.clock(Utc::now());
        terminal.draw(|f| ui::draw(f, app.view_mut(), &clock))?;

        if event::poll(tick)? {
            match event::read()? {
                // Skip key release events (crossterm fires both press and release).
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(input) = map_key(key) {
                        app.handle_input(input, Utc::now());
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.handle_click(mouse.column, mouse.row, Utc::now());
                }
                _ => {}
            }
        }

        if app.should_quit() {
            info!(phase = app.session().game().phase(), "Leaving game");
            return Ok(());
        }

        // Let spawned score writes make progress.
        tokio::task::yield_now().await;
    }
}

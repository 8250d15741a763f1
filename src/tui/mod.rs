// TUI module for the interactive search screen
mod app;
mod events;
mod layout;
mod rendering;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
pub use app::{App, SearchPhase};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::client::GeminiClient;
use crate::session::SessionState;

/// Run the interactive search screen.
///
/// `session_dir` is where form changes are persisted; `None` disables
/// persistence (used by tests).
pub fn run_interactive(
    client: GeminiClient,
    session_dir: Option<PathBuf>,
    initial: SessionState,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(client, session_dir, initial);

    // Run event loop
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

//! Terminal setup and teardown
//!
//! Initializes raw mode and the alternate screen, and restores the terminal
//! on exit and from the panic hook.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::Ledger;

use super::app::ViewerState;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> io::Result<Tui> {
    // The viewer can be opened several times from the menu
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Show `ledger` in the table viewer until the user quits
pub fn run_viewer(ledger: &Ledger, settings: &Settings) -> TallyResult<()> {
    let mut state = ViewerState::from_ledger(ledger, settings.default_sort);
    debug!(rows = state.total(), "opening table viewer");

    let mut terminal = init_terminal().map_err(tui_error)?;
    let result = event_loop(&mut terminal, &mut state);
    let restored = restore_terminal();

    result.map_err(tui_error)?;
    restored.map_err(tui_error)
}

fn event_loop(terminal: &mut Tui, state: &mut ViewerState) -> io::Result<()> {
    let events = EventHandler::default();

    while !state.should_quit {
        terminal.draw(|frame| super::view::render(frame, state))?;
        handle_event(state, events.next()?);
    }

    Ok(())
}

fn tui_error(e: io::Error) -> TallyError {
    TallyError::Tui(e.to_string())
}

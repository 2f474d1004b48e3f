//! Event handler for the TUI
//!
//! Routes key presses to the viewer state based on the current mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::SortField;

use super::app::{Mode, ViewerState};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(state: &mut ViewerState, event: Event) {
    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Resize(_, _) | Event::Tick => {}
    }
}

/// Handle a key press
pub fn handle_key(state: &mut ViewerState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit();
        return;
    }

    match state.mode {
        Mode::Browse => handle_browse_key(state, key),
        Mode::Search => handle_search_key(state, key),
    }
}

fn handle_browse_key(state: &mut ViewerState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit(),
        KeyCode::Char('/') => state.begin_search(),
        KeyCode::Char('d') => state.sort_by_column(SortField::Date),
        KeyCode::Char('c') => state.sort_by_column(SortField::Category),
        KeyCode::Char('a') => state.sort_by_column(SortField::Amount),
        KeyCode::Char('r') => state.reset(),
        KeyCode::Char('j') | KeyCode::Down => state.select_next(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => state.select_first(),
        KeyCode::Char('G') | KeyCode::End => state.select_last(),
        _ => {}
    }
}

fn handle_search_key(state: &mut ViewerState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => state.apply_search(),
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Backspace => state.search_input.backspace(),
        KeyCode::Delete => state.search_input.delete(),
        KeyCode::Left => state.search_input.move_left(),
        KeyCode::Right => state.search_input.move_right(),
        KeyCode::Home => state.search_input.move_start(),
        KeyCode::End => state.search_input.move_end(),
        KeyCode::Char(c) => state.search_input.insert(c),
        _ => {}
    }
}

//! Layout definitions for the TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the table viewer
pub struct ViewerLayout {
    /// Title and key hints
    pub header: Rect,
    /// The entry table
    pub table: Rect,
    /// Search input line
    pub search: Rect,
    /// Row counts and sort indicator
    pub status_bar: Rect,
}

impl ViewerLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Search
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            table: chunks[1],
            search: chunks[2],
            status_bar: chunks[3],
        }
    }
}

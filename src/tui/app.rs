//! Viewer state
//!
//! Holds the rows being shown together with the active search and sort.
//! Nothing here touches the terminal, so every transition is unit tested.

use crate::models::{Ledger, LedgerRow, SortField};
use crate::services::search;

use super::widgets::TextInput;

/// Input mode of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys move the selection and pick sort columns
    #[default]
    Browse,
    /// Keys edit the search query
    Search,
}

/// State of the table viewer
#[derive(Debug)]
pub struct ViewerState {
    /// Every row of the ledger in file order
    rows: Vec<LedgerRow>,
    /// The rows currently on screen
    visible: Vec<LedgerRow>,
    /// Query applied to `visible` (empty shows everything)
    query: String,
    pub search_input: TextInput,
    pub mode: Mode,
    /// Active sort column and whether it is descending
    sort: Option<(SortField, bool)>,
    selected: usize,
    pub should_quit: bool,
}

impl ViewerState {
    /// Create the state for `rows`, optionally sorted ascending by `default_sort`
    pub fn new(rows: Vec<LedgerRow>, default_sort: Option<SortField>) -> Self {
        let mut state = Self {
            visible: rows.clone(),
            rows,
            query: String::new(),
            search_input: TextInput::new().label("Search").placeholder("press / to search"),
            mode: Mode::Browse,
            sort: default_sort.map(|field| (field, false)),
            selected: 0,
            should_quit: false,
        };
        state.refresh();
        state
    }

    /// Create the state for everything in `ledger`
    pub fn from_ledger(ledger: &Ledger, default_sort: Option<SortField>) -> Self {
        Self::new(ledger.list_all(), default_sort)
    }

    pub fn visible(&self) -> &[LedgerRow] {
        &self.visible
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<(SortField, bool)> {
        self.sort
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&LedgerRow> {
        self.visible.get(self.selected)
    }

    /// Start editing the query, seeded with the one currently applied
    pub fn begin_search(&mut self) {
        self.search_input.set_content(self.query.clone());
        self.search_input.focused = true;
        self.mode = Mode::Search;
    }

    /// Apply the edited query and go back to browsing
    pub fn apply_search(&mut self) {
        self.query = self.search_input.value().trim().to_string();
        self.search_input.focused = false;
        self.mode = Mode::Browse;
        self.selected = 0;
        self.refresh();
    }

    /// Leave the query as it was before editing started
    pub fn cancel_search(&mut self) {
        self.search_input.set_content(self.query.clone());
        self.search_input.focused = false;
        self.mode = Mode::Browse;
    }

    /// Sort by `field`; choosing the active column again flips the direction
    pub fn sort_by_column(&mut self, field: SortField) {
        self.sort = match self.sort {
            Some((current, descending)) if current == field => Some((field, !descending)),
            _ => Some((field, false)),
        };
        self.refresh();
    }

    /// Drop the query and sort, showing every row in file order
    pub fn reset(&mut self) {
        self.query.clear();
        self.search_input.clear();
        self.sort = None;
        self.selected = 0;
        self.refresh();
    }

    /// Recompute the visible rows from the query and sort
    pub fn refresh(&mut self) {
        let mut visible = search::filter(&self.rows, &self.query);
        if let Some((field, descending)) = self.sort {
            search::sort_rows(&mut visible, field, descending);
        }
        self.visible = visible;
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }
}

//! Terminal User Interface module
//!
//! A full-screen table viewer over the ledger built on ratatui, with search
//! and sort-by-column. The viewer is read-only.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod view;

pub mod widgets;

pub use app::{Mode, ViewerState};
pub use terminal::run_viewer;

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod entry;
pub mod menu;
pub mod session;

pub use entry::{handle_entry_command, EntryCommands};
pub use menu::run_menu;
pub use session::{Opened, Session};

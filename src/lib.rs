//! Tally - a personal income and expense ledger
//!
//! Entries (an amount and a date) are grouped by category and kept in a
//! single JSON file. The binary offers one-shot commands, an interactive
//! menu, and a full-screen table viewer with search and sort.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Entries, the ledger and flattened rows
//! - `storage`: JSON file storage layer
//! - `services`: Mutations with persistence, import, search and sort
//! - `audit`: Audit logging system
//! - `display`: Plain-text formatting
//! - `cli`: Command handlers and the interactive menu
//! - `tui`: Table viewer
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::models::{Entry, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.add_entry("food", Entry::new(-12.5, "2024-01-01"));
//! assert_eq!(ledger.summary().count, 1);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{TallyError, TallyResult};

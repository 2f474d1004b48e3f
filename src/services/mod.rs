//! Business logic layer for Tally
//!
//! Services wrap the in-memory ledger and its store; free functions cover
//! import parsing and search/sort over flattened rows.

pub mod import;
pub mod ledger;
pub mod search;

pub use import::{ImportReport, ImportedEntry};
pub use ledger::LedgerService;
pub use search::{filter, filter_ledger, sort_by, sort_rows};

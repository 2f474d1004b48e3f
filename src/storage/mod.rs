//! Storage layer for Tally
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, read_json_or_default, write_json_atomic, write_json_atomic_pretty};
pub use ledger::{LedgerStore, LoadOutcome};

//! Core data models for Tally
//!
//! - `Entry`: one amount and date
//! - `Ledger`: category name to ordered entries
//! - `LedgerRow`: a flattened `(category, entry)` pair
//! - `SortField`: columns rows can be ordered by

pub mod entry;
pub mod ledger;
pub mod row;

pub use entry::{format_amount, parse_amount, Entry};
pub use ledger::{normalize_category, Ledger, Summary};
pub use row::{LedgerRow, SortField};

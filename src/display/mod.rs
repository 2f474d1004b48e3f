//! Display formatting for terminal output

pub mod ledger;

pub use ledger::{
    format_category_entries, format_entry_list, format_history, format_import_report,
    format_summary,
};

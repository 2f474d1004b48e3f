//! Entry CLI commands
//!
//! Implements the one-shot commands for adding, listing, changing and
//! searching ledger entries.

use std::io::Write;
use std::path::Path;

use clap::Subcommand;

use crate::display::ledger::{
    format_category_entries, format_entry_list, format_history, format_import_report,
    format_summary,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{format_amount, parse_amount, SortField};
use crate::services::search;

use super::session::Session;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a new income (positive) or expense (negative) entry
    #[command(allow_negative_numbers = true)]
    Add {
        /// Category name (e.g. "food", "salary")
        category: String,
        /// Amount, e.g. "-12.50" for an expense
        amount: String,
        /// Entry date, defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List entries
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Replace an entry, optionally moving it to another category
    #[command(allow_negative_numbers = true)]
    Update {
        /// Current category of the entry
        category: String,
        /// Index of the entry within its category (see `list`)
        index: usize,
        /// Category the entry should end up in
        new_category: String,
        /// New amount
        amount: String,
        /// New date, defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Category of the entry
        category: String,
        /// Index of the entry within its category (see `list`)
        index: usize,
    },
    /// Show entry count and total amount
    Summary,
    /// Find entries whose date, category or amount contains the query
    Search {
        query: String,
        /// Sort results by a column
        #[arg(short, long, value_enum)]
        sort: Option<SortField>,
        /// Sort in descending order
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Import `type,amount,date` lines from a text file
    Import {
        /// Path to the delimited file
        path: String,
    },
    /// Show recent changes from the audit log
    History {
        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

/// Handle an entry command
pub fn handle_entry_command<W: Write>(
    session: &mut Session,
    cmd: EntryCommands,
    out: &mut W,
) -> TallyResult<()> {
    match cmd {
        EntryCommands::Add {
            category,
            amount,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = session.resolve_date(date);
            let index = session.service().add_entry(&category, amount, &date)?;
            writeln!(
                out,
                "Added {} on {} to '{}' (index {})",
                format_amount(amount),
                date,
                category.trim().to_lowercase(),
                index
            )?;
        }
        EntryCommands::List { category } => match category {
            Some(category) => {
                let entries = session
                    .ledger()
                    .entries(&category)
                    .ok_or_else(|| TallyError::CategoryNotFound(category.trim().to_lowercase()))?;
                write!(out, "{}", format_category_entries(&category, entries))?;
            }
            None => write!(out, "{}", format_entry_list(&session.ledger().list_all()))?,
        },
        EntryCommands::Update {
            category,
            index,
            new_category,
            amount,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = session.resolve_date(date);
            let previous =
                session
                    .service()
                    .update_entry(&category, index, &new_category, amount, &date)?;
            writeln!(
                out,
                "Updated entry: {} -> {} on {} in '{}'",
                previous,
                format_amount(amount),
                date,
                new_category.trim().to_lowercase()
            )?;
        }
        EntryCommands::Delete { category, index } => {
            let removed = session.service().delete_entry(&category, index)?;
            writeln!(out, "Deleted entry: {}", removed)?;
        }
        EntryCommands::Summary => {
            write!(out, "{}", format_summary(&session.ledger().summary()))?;
        }
        EntryCommands::Search { query, sort, desc } => {
            let mut rows = search::filter_ledger(session.ledger(), &query);
            if let Some(field) = sort {
                search::sort_rows(&mut rows, field, desc);
            }
            write!(out, "{}", format_entry_list(&rows))?;
        }
        EntryCommands::Import { path } => {
            let report = session.service().import_delimited(Path::new(&path))?;
            write!(out, "{}", format_import_report(&report, &path))?;
        }
        EntryCommands::History { limit } => {
            let records = match session.audit() {
                Some(logger) => logger.read_recent(limit)?,
                None => Vec::new(),
            };
            write!(out, "{}", format_history(&records))?;
        }
    }

    Ok(())
}

//! Flattened ledger rows
//!
//! A `LedgerRow` is one entry together with the category it belongs to,
//! as produced by flattening the ledger for listing, search and sorting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entry::{format_amount, Entry};

/// One entry with its category and position inside that category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub category: String,
    /// Position of the entry within its category
    pub index: usize,
    pub entry: Entry,
}

impl LedgerRow {
    pub fn new(category: impl Into<String>, index: usize, entry: Entry) -> Self {
        Self {
            category: category.into(),
            index,
            entry,
        }
    }

    /// Case-insensitive substring match against date, category and amount
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.entry.date.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || format_amount(self.entry.amount).contains(&needle)
    }
}

/// Column a list of rows can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Category,
    Amount,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "Date"),
            Self::Category => write!(f, "Category"),
            Self::Amount => write!(f, "Amount"),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "category" | "type" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

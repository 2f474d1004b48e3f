//! Error types for Tally
//!
//! Every fallible ledger operation reports one of these variants. None of them
//! is fatal: callers surface the message and keep the last good ledger.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// The storage file does not exist yet (treated as an empty ledger)
    #[error("File not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// Malformed storage or import content
    #[error("Parse error in {source_name}{}: {message}", line_suffix(.line))]
    Parse {
        source_name: String,
        line: Option<usize>,
        message: String,
    },

    /// Input that is not a finite number where an amount was expected
    #[error("Invalid amount: '{0}' is not a number")]
    InvalidAmount(String),

    /// Update or delete targeted a category that holds no entries
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Update or delete targeted an index outside the category's entries
    #[error("Index {index} out of range for category '{category}' ({len} entries)")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}

impl TallyError {
    /// Create a parse error that names the offending line
    pub fn parse_at(source_name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Create a parse error for a whole document
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if the caller should ask again for the same input
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Tally operations
pub type TallyResult<T> = Result<T, TallyError>;

//! Audit record data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// An entry was added
    Create,
    /// An entry was replaced
    Update,
    /// An entry was removed
    Delete,
    /// A batch of entries was imported from a delimited file
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log record
///
/// Records one ledger mutation with the entry values before and after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Category affected (the destination category for moves and imports)
    pub category: String,

    /// Position of the affected entry within its category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Category the entry was moved out of, for updates that change category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Entry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Entry>,

    /// Number of entries affected, for imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl AuditRecord {
    fn base(operation: Operation, category: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            category: category.into(),
            index: None,
            from_category: None,
            before: None,
            after: None,
            count: None,
        }
    }

    /// Record for an added entry
    pub fn create(category: impl Into<String>, index: usize, entry: &Entry) -> Self {
        Self {
            index: Some(index),
            after: Some(entry.clone()),
            ..Self::base(Operation::Create, category)
        }
    }

    /// Record for a replaced entry
    pub fn update(
        old_category: &str,
        index: usize,
        new_category: &str,
        before: &Entry,
        after: &Entry,
    ) -> Self {
        let from_category = (old_category != new_category).then(|| old_category.to_string());
        Self {
            index: Some(index),
            from_category,
            before: Some(before.clone()),
            after: Some(after.clone()),
            ..Self::base(Operation::Update, new_category)
        }
    }

    /// Record for a removed entry
    pub fn delete(category: impl Into<String>, index: usize, entry: &Entry) -> Self {
        Self {
            index: Some(index),
            before: Some(entry.clone()),
            ..Self::base(Operation::Delete, category)
        }
    }

    /// Record for a delimited-file import
    pub fn import(source: impl Into<String>, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::base(Operation::Import, source)
        }
    }

    /// One-line human-readable description
    pub fn describe(&self) -> String {
        let when = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        match self.operation {
            Operation::Create => format!(
                "{} {} {} #{}: {}",
                when,
                self.operation,
                self.category,
                self.index.unwrap_or_default(),
                describe_entry(self.after.as_ref())
            ),
            Operation::Update => {
                let from = self
                    .from_category
                    .as_ref()
                    .map(|c| format!(" (from {})", c))
                    .unwrap_or_default();
                format!(
                    "{} {} {}{} #{}: {} -> {}",
                    when,
                    self.operation,
                    self.category,
                    from,
                    self.index.unwrap_or_default(),
                    describe_entry(self.before.as_ref()),
                    describe_entry(self.after.as_ref())
                )
            }
            Operation::Delete => format!(
                "{} {} {} #{}: {}",
                when,
                self.operation,
                self.category,
                self.index.unwrap_or_default(),
                describe_entry(self.before.as_ref())
            ),
            Operation::Import => format!(
                "{} {} {} entries from {}",
                when,
                self.operation,
                self.count.unwrap_or_default(),
                self.category
            ),
        }
    }
}

fn describe_entry(entry: Option<&Entry>) -> String {
    entry.map(Entry::to_string).unwrap_or_else(|| "-".to_string())
}

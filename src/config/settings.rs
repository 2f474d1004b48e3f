//! User settings for Tally
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so a partial or missing file is fine.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::SortField;
use crate::storage::{read_json_or_default, write_json_atomic_pretty};

/// User settings for Tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// strftime format used to stamp new entries with today's date
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether mutations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Initial sort column of the table viewer (file order when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortField>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            audit_enabled: default_audit_enabled(),
            default_sort: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        read_json_or_default(paths.settings_file())
            .map_err(|e| TallyError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;
        write_json_atomic_pretty(paths.settings_file(), self)
    }

    /// Today's local date in the configured format
    ///
    /// An unusable format falls back to ISO `%Y-%m-%d`.
    pub fn today(&self) -> String {
        let today = Local::now().date_naive();
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.date_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            warn!(format = %self.date_format, "invalid date_format setting, using ISO dates");
            return today.format("%Y-%m-%d").to_string();
        }
        today.format_with_items(items.into_iter()).to_string()
    }
}

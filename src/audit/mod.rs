//! Audit logging for Tally
//!
//! Records every add, update, delete and import with before/after entry
//! values in an append-only JSON-lines file.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::audit::{AuditLogger, AuditRecord};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditRecord::create("food", 0, &entry))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditRecord, Operation};
pub use logger::AuditLogger;

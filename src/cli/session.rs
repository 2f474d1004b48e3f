//! Per-invocation ledger session
//!
//! Owns the ledger loaded at startup together with its store, settings and
//! audit log, and hands out `LedgerService`s for mutations.

use std::path::PathBuf;

use tracing::warn;

use crate::audit::AuditLogger;
use crate::config::{Settings, TallyPaths};
use crate::error::{TallyError, TallyResult};
use crate::models::Ledger;
use crate::services::LedgerService;
use crate::storage::LedgerStore;

/// The ledger being worked on during one run of the program
pub struct Session {
    settings: Settings,
    store: LedgerStore,
    ledger: Ledger,
    audit: Option<AuditLogger>,
}

/// A session plus whatever went wrong while loading it
pub struct Opened {
    pub session: Session,
    /// Set when the ledger file was unreadable and the session starts empty
    pub problem: Option<TallyError>,
}

impl Session {
    /// Open the session for the configured paths
    ///
    /// `ledger_file` overrides the default ledger location.
    pub fn open(
        paths: &TallyPaths,
        settings: Settings,
        ledger_file: Option<PathBuf>,
    ) -> TallyResult<Opened> {
        let store = LedgerStore::new(ledger_file.unwrap_or_else(|| paths.ledger_file()));
        let audit = if settings.audit_enabled {
            paths.ensure_directories()?;
            Some(AuditLogger::new(paths.audit_log()))
        } else {
            None
        };
        Ok(Self::from_parts(store, settings, audit))
    }

    /// Open a session over an explicit store
    pub fn from_parts(store: LedgerStore, settings: Settings, audit: Option<AuditLogger>) -> Opened {
        let outcome = store.load();
        if let Some(problem) = &outcome.problem {
            if problem.is_parse_error() {
                match store.preserve_corrupt() {
                    Ok(copy) => warn!(copy = %copy.display(), "kept a copy of the unreadable ledger"),
                    Err(e) => warn!(error = %e, "could not copy the unreadable ledger"),
                }
            }
        }
        Opened {
            session: Self {
                settings,
                store,
                ledger: outcome.ledger,
                audit,
            },
            problem: outcome.problem,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// A service that mutates this session's ledger and flushes it
    pub fn service(&mut self) -> LedgerService<'_> {
        LedgerService::new(&self.store, &mut self.ledger).with_audit(self.audit.as_ref())
    }

    /// The date stamped on new entries when none is given
    pub fn resolve_date(&self, date: Option<String>) -> String {
        match date {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => self.settings.today(),
        }
    }
}

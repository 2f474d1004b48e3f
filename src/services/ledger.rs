//! Ledger service
//!
//! Applies CRUD operations to an in-memory ledger and flushes the whole
//! ledger to its store after every successful mutation. A rejected operation
//! or a failed flush leaves the ledger exactly as it was before the call.

use std::path::Path;

use tracing::{debug, warn};

use crate::audit::{AuditLogger, AuditRecord};
use crate::error::{TallyError, TallyResult};
use crate::models::{normalize_category, Entry, Ledger, LedgerRow, Summary};
use crate::storage::LedgerStore;

use super::import::{self, ImportReport};

/// Service for ledger management
pub struct LedgerService<'a> {
    store: &'a LedgerStore,
    ledger: &'a mut Ledger,
    audit: Option<&'a AuditLogger>,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service over a loaded ledger
    pub fn new(store: &'a LedgerStore, ledger: &'a mut Ledger) -> Self {
        Self {
            store,
            ledger,
            audit: None,
        }
    }

    /// Record mutations in the given audit log
    pub fn with_audit(mut self, audit: Option<&'a AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// The current in-memory ledger
    pub fn ledger(&self) -> &Ledger {
        &*self.ledger
    }

    /// Append an entry to `category`, creating it if absent
    ///
    /// Returns the index of the new entry within its category.
    pub fn add_entry(&mut self, category: &str, amount: f64, date: &str) -> TallyResult<usize> {
        let entry = finite_entry(amount, date)?;
        let key = normalize_category(category);

        let index = self.commit(|ledger| Ok(ledger.add_entry(&key, entry.clone())))?;
        debug!(category = %key, index, amount, "added entry");
        self.record(AuditRecord::create(&key, index, &entry));
        Ok(index)
    }

    /// Replace the entry at `index` in `old_category`
    ///
    /// Moves the entry to `new_category` when the names differ. Returns the
    /// entry that was replaced.
    pub fn update_entry(
        &mut self,
        old_category: &str,
        index: usize,
        new_category: &str,
        amount: f64,
        date: &str,
    ) -> TallyResult<Entry> {
        let entry = finite_entry(amount, date)?;
        let old_key = normalize_category(old_category);
        let new_key = normalize_category(new_category);

        let previous = self.commit(|ledger| {
            ledger.update_entry(&old_key, index, &new_key, entry.clone())
        })?;
        debug!(from = %old_key, to = %new_key, index, "updated entry");
        self.record(AuditRecord::update(&old_key, index, &new_key, &previous, &entry));
        Ok(previous)
    }

    /// Remove the entry at `index` in `category`
    pub fn delete_entry(&mut self, category: &str, index: usize) -> TallyResult<Entry> {
        let key = normalize_category(category);

        let removed = self.commit(|ledger| ledger.delete_entry(&key, index))?;
        debug!(category = %key, index, "deleted entry");
        self.record(AuditRecord::delete(&key, index, &removed));
        Ok(removed)
    }

    /// Import a `type,amount,date` file
    ///
    /// Nothing is appended unless every line parses.
    pub fn import_delimited(&mut self, path: &Path) -> TallyResult<ImportReport> {
        let parsed = import::read_delimited_file(path)?;
        let report = self.commit(|ledger| Ok(import::apply(ledger, parsed)))?;
        debug!(path = %path.display(), imported = report.imported, "imported entries");
        self.record(AuditRecord::import(path.display().to_string(), report.imported));
        Ok(report)
    }

    /// Every entry as `(category, entry)` rows
    pub fn list_all(&self) -> Vec<LedgerRow> {
        self.ledger.list_all()
    }

    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }

    /// Run a mutation and flush, restoring the previous state on any failure
    fn commit<T, F>(&mut self, mutate: F) -> TallyResult<T>
    where
        F: FnOnce(&mut Ledger) -> TallyResult<T>,
    {
        let snapshot = self.ledger.clone();
        let result = mutate(&mut *self.ledger)
            .and_then(|value| self.store.save(&*self.ledger).map(|()| value));
        if result.is_err() {
            *self.ledger = snapshot;
        }
        result
    }

    fn record(&self, record: AuditRecord) {
        if let Some(logger) = self.audit {
            if let Err(e) = logger.log(&record) {
                warn!(error = %e, "failed to write audit record");
            }
        }
    }
}

fn finite_entry(amount: f64, date: &str) -> TallyResult<Entry> {
    if !amount.is_finite() {
        return Err(TallyError::InvalidAmount(amount.to_string()));
    }
    Ok(Entry::new(amount, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        store: LedgerStore,
        audit: AuditLogger,
        ledger: Ledger,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let store = LedgerStore::new(temp.path().join("transactions.json"));
        let audit = AuditLogger::new(temp.path().join("audit.log"));
        Fixture {
            _temp: temp,
            store,
            audit,
            ledger: Ledger::new(),
        }
    }

    #[test]
    fn test_add_flushes_to_disk() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);

        service.add_entry("Food", 20.5, "2024-01-01").unwrap();
        service.add_entry("food", -10.0, "2024-01-02").unwrap();

        let summary = service.summary();
        assert_eq!(summary.count, 2);
        assert!((summary.total - 10.5).abs() < 1e-9);

        let on_disk = fx.store.load_strict().unwrap();
        assert_eq!(on_disk, fx.ledger);
        assert_eq!(on_disk.entries("food").unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_non_finite_amount() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);

        let err = service.add_entry("food", f64::NAN, "2024-01-01").unwrap_err();
        assert!(err.is_retryable());
        assert!(!fx.store.path().exists());
        assert!(fx.ledger.is_empty());
    }

    #[test]
    fn test_delete_only_entry_removes_category() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);
        service.add_entry("food", 5.0, "2024-01-01").unwrap();

        service.delete_entry("food", 0).unwrap();
        assert!(service.list_all().is_empty());

        let on_disk = fs::read_to_string(fx.store.path()).unwrap();
        assert_eq!(on_disk, "{}");
    }

    #[test]
    fn test_update_moves_entry_and_persists() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);
        service.add_entry("food", 5.0, "2024-01-01").unwrap();

        let previous = service
            .update_entry("food", 0, "Dining", 7.5, "2024-01-02")
            .unwrap();
        assert_eq!(previous, Entry::new(5.0, "2024-01-01"));

        let on_disk = fx.store.load_strict().unwrap();
        assert!(!on_disk.contains_category("food"));
        assert_eq!(on_disk.entries("dining").unwrap()[0].amount, 7.5);
    }

    #[test]
    fn test_failed_operation_does_not_touch_disk() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);
        service.add_entry("food", 5.0, "2024-01-01").unwrap();
        let before = fs::read_to_string(fx.store.path()).unwrap();

        assert!(matches!(
            service.delete_entry("rent", 0),
            Err(TallyError::CategoryNotFound(_))
        ));
        assert!(matches!(
            service.update_entry("food", 9, "food", 1.0, "x"),
            Err(TallyError::IndexOutOfRange { .. })
        ));

        assert_eq!(fs::read_to_string(fx.store.path()).unwrap(), before);
    }

    #[test]
    fn test_failed_save_restores_ledger() {
        let temp = TempDir::new().unwrap();
        // A directory in place of the file makes every rename fail.
        let blocked = temp.path().join("transactions.json");
        fs::create_dir_all(blocked.join("occupied")).unwrap();
        let store = LedgerStore::new(&blocked);

        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));
        let original = ledger.clone();

        let mut service = LedgerService::new(&store, &mut ledger);
        assert!(service.add_entry("rent", -5.0, "2024-01-02").is_err());
        assert!(service.delete_entry("food", 0).is_err());

        assert_eq!(ledger, original);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut fx = fixture();
        let good = fx._temp.path().join("good.txt");
        let bad = fx._temp.path().join("bad.txt");
        fs::write(&good, "food,1,2024-01-01\nrent,-500,2024-01-02\n").unwrap();
        fs::write(&bad, "food,2,2024-01-03\nfood,oops,2024-01-04\n").unwrap();

        let mut service = LedgerService::new(&fx.store, &mut fx.ledger);
        let report = service.import_delimited(&good).unwrap();
        assert_eq!(report.imported, 2);

        let err = service.import_delimited(&bad).unwrap_err();
        assert!(matches!(err, TallyError::Parse { line: Some(2), .. }));
        assert_eq!(service.summary().count, 2);
        assert_eq!(fx.store.load_strict().unwrap().len(), 2);
    }

    #[test]
    fn test_mutations_are_audited() {
        let mut fx = fixture();
        let mut service = LedgerService::new(&fx.store, &mut fx.ledger).with_audit(Some(&fx.audit));

        service.add_entry("food", 5.0, "2024-01-01").unwrap();
        service.update_entry("food", 0, "food", 6.0, "2024-01-01").unwrap();
        service.delete_entry("food", 0).unwrap();
        let _ = service.delete_entry("food", 0);

        let ops: Vec<_> = fx
            .audit
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.operation)
            .collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
    }
}

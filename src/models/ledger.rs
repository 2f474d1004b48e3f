//! Ledger model
//!
//! Maps category names to the entries recorded under them, in insertion
//! order. A category exists only while it holds at least one entry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::row::LedgerRow;
use crate::error::{TallyError, TallyResult};

/// Categories in the order they were first created
type CategoryMap = IndexMap<String, Vec<Entry>>;

/// Normalize a category name for storage and lookup
pub fn normalize_category(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Entry count and arithmetic total across every category
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
}

/// The full set of categorized entries
///
/// Serializes as the bare `category -> [entry]` object. Deserializing drops
/// any category whose list is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CategoryMap", into = "CategoryMap")]
pub struct Ledger {
    categories: CategoryMap,
}

impl From<CategoryMap> for Ledger {
    fn from(mut categories: CategoryMap) -> Self {
        categories.retain(|_, entries| !entries.is_empty());
        Self { categories }
    }
}

impl From<Ledger> for CategoryMap {
    fn from(ledger: Ledger) -> Self {
        ledger.categories
    }
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the ledger has no entries at all
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of entries across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Category names, in iteration order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Check whether a category currently holds entries
    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(&normalize_category(category))
    }

    /// Entries of one category, or `None` if it does not exist
    pub fn entries(&self, category: &str) -> Option<&[Entry]> {
        self.categories
            .get(&normalize_category(category))
            .map(Vec::as_slice)
    }

    /// Append an entry, creating the category if needed
    ///
    /// Returns the index of the new entry within its category.
    pub fn add_entry(&mut self, category: &str, entry: Entry) -> usize {
        let entries = self
            .categories
            .entry(normalize_category(category))
            .or_default();
        entries.push(entry);
        entries.len() - 1
    }

    /// Replace the entry at `index` in `old_category`
    ///
    /// When the category changes, the old entry is removed (dropping the old
    /// category if it empties) and the new entry is appended to
    /// `new_category`. Returns the replaced entry.
    pub fn update_entry(
        &mut self,
        old_category: &str,
        index: usize,
        new_category: &str,
        entry: Entry,
    ) -> TallyResult<Entry> {
        let old_key = normalize_category(old_category);
        let new_key = normalize_category(new_category);
        self.check_target(&old_key, index)?;

        if old_key == new_key {
            let slot = self
                .categories
                .get_mut(&old_key)
                .and_then(|entries| entries.get_mut(index))
                .ok_or_else(|| TallyError::CategoryNotFound(old_key.clone()))?;
            return Ok(std::mem::replace(slot, entry));
        }

        let previous = self.remove_at(&old_key, index)?;
        self.categories.entry(new_key).or_default().push(entry);
        Ok(previous)
    }

    /// Remove the entry at `index`, dropping the category if it empties
    pub fn delete_entry(&mut self, category: &str, index: usize) -> TallyResult<Entry> {
        let key = normalize_category(category);
        self.check_target(&key, index)?;
        self.remove_at(&key, index)
    }

    /// Flatten into `(category, entry)` rows, category by category in
    /// creation order
    pub fn list_all(&self) -> Vec<LedgerRow> {
        self.categories
            .iter()
            .flat_map(|(category, entries)| {
                entries
                    .iter()
                    .enumerate()
                    .map(move |(index, entry)| LedgerRow::new(category, index, entry.clone()))
            })
            .collect()
    }

    /// Count and total of every entry
    pub fn summary(&self) -> Summary {
        self.categories
            .values()
            .flatten()
            .fold(Summary::default(), |acc, entry| Summary {
                count: acc.count + 1,
                total: acc.total + entry.amount,
            })
    }

    fn check_target(&self, key: &str, index: usize) -> TallyResult<()> {
        let entries = self
            .categories
            .get(key)
            .ok_or_else(|| TallyError::CategoryNotFound(key.to_string()))?;
        if index >= entries.len() {
            return Err(TallyError::IndexOutOfRange {
                category: key.to_string(),
                index,
                len: entries.len(),
            });
        }
        Ok(())
    }

    fn remove_at(&mut self, key: &str, index: usize) -> TallyResult<Entry> {
        let entries = self
            .categories
            .get_mut(key)
            .ok_or_else(|| TallyError::CategoryNotFound(key.to_string()))?;
        let removed = entries.remove(index);
        if entries.is_empty() {
            self.categories.shift_remove(key);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_empty_categories(ledger: &Ledger) -> bool {
        ledger
            .categories()
            .all(|c| ledger.entries(c).map_or(false, |e| !e.is_empty()))
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(20.5, "2024-01-01"));
        ledger.add_entry("food", Entry::new(-10.0, "2024-01-02"));

        let rows = ledger.list_all();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entry, Entry::new(20.5, "2024-01-01"));
        assert_eq!(rows[1].entry, Entry::new(-10.0, "2024-01-02"));

        let summary = ledger.summary();
        assert_eq!(summary.count, 2);
        assert!((summary.total - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_names_are_lowercased() {
        let mut ledger = Ledger::new();
        ledger.add_entry("  Food ", Entry::new(1.0, "2024-01-01"));
        assert!(ledger.contains_category("food"));
        assert!(ledger.contains_category("FOOD"));
        assert_eq!(ledger.categories().collect::<Vec<_>>(), vec!["food"]);
    }

    #[test]
    fn test_delete_last_entry_removes_category() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(5.0, "2024-01-01"));

        let removed = ledger.delete_entry("food", 0).unwrap();
        assert_eq!(removed.amount, 5.0);
        assert!(!ledger.contains_category("food"));
        assert!(ledger.list_all().is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_delete_keeps_other_entries() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));
        ledger.add_entry("food", Entry::new(2.0, "2024-01-02"));
        ledger.add_entry("food", Entry::new(3.0, "2024-01-03"));

        ledger.delete_entry("food", 1).unwrap();
        let amounts: Vec<f64> = ledger.entries("food").unwrap().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![1.0, 3.0]);
    }

    #[test]
    fn test_delete_validates_against_entry_count() {
        let mut ledger = Ledger::new();
        ledger.add_entry("groceries", Entry::new(1.0, "2024-01-01"));

        // The category name is longer than its entry list; only the list counts.
        let err = ledger.delete_entry("groceries", 3).unwrap_err();
        assert!(matches!(
            err,
            TallyError::IndexOutOfRange { index: 3, len: 1, .. }
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_delete_missing_category() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.delete_entry("rent", 0),
            Err(TallyError::CategoryNotFound(c)) if c == "rent"
        ));
    }

    #[test]
    fn test_update_in_place() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));
        ledger.add_entry("food", Entry::new(2.0, "2024-01-02"));

        let old = ledger
            .update_entry("food", 0, "Food", Entry::new(9.0, "2024-02-01"))
            .unwrap();
        assert_eq!(old.amount, 1.0);
        let entries = ledger.entries("food").unwrap();
        assert_eq!(entries[0], Entry::new(9.0, "2024-02-01"));
        assert_eq!(entries[1].amount, 2.0);
    }

    #[test]
    fn test_update_moves_between_categories() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));
        ledger.add_entry("food", Entry::new(2.0, "2024-01-02"));
        ledger.add_entry("rent", Entry::new(-500.0, "2024-01-01"));

        ledger
            .update_entry("food", 1, "rent", Entry::new(-600.0, "2024-02-01"))
            .unwrap();

        assert_eq!(ledger.entries("food").unwrap().len(), 1);
        let rent = ledger.entries("rent").unwrap();
        assert_eq!(rent.len(), 2);
        assert_eq!(rent[1], Entry::new(-600.0, "2024-02-01"));
    }

    #[test]
    fn test_update_moving_last_entry_drops_old_category() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));

        ledger
            .update_entry("food", 0, "salary", Entry::new(100.0, "2024-01-05"))
            .unwrap();

        assert!(!ledger.contains_category("food"));
        assert_eq!(ledger.entries("salary").unwrap().len(), 1);
        assert!(no_empty_categories(&ledger));
    }

    #[test]
    fn test_update_rejects_bad_target() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(1.0, "2024-01-01"));

        assert!(matches!(
            ledger.update_entry("rent", 0, "food", Entry::new(2.0, "x")),
            Err(TallyError::CategoryNotFound(_))
        ));
        assert!(matches!(
            ledger.update_entry("food", 1, "rent", Entry::new(2.0, "x")),
            Err(TallyError::IndexOutOfRange { .. })
        ));
        // Failed updates leave the ledger untouched.
        assert_eq!(ledger.list_all().len(), 1);
        assert!(!ledger.contains_category("rent"));
    }

    #[test]
    fn test_no_empty_categories_after_mixed_operations() {
        let mut ledger = Ledger::new();
        ledger.add_entry("a", Entry::new(1.0, "d1"));
        ledger.add_entry("b", Entry::new(2.0, "d2"));
        ledger.add_entry("a", Entry::new(3.0, "d3"));
        ledger.update_entry("b", 0, "a", Entry::new(4.0, "d4")).unwrap();
        ledger.delete_entry("a", 0).unwrap();
        ledger.update_entry("a", 0, "c", Entry::new(5.0, "d5")).unwrap();
        ledger.delete_entry("a", 0).unwrap();

        assert!(no_empty_categories(&ledger));
        assert_eq!(ledger.categories().collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(ledger.summary().count, ledger.list_all().len());
    }

    #[test]
    fn test_summary_of_empty_ledger() {
        let ledger = Ledger::new();
        assert_eq!(ledger.summary(), Summary::default());
        assert!(ledger.list_all().is_empty());
    }

    #[test]
    fn test_serializes_as_bare_mapping() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(20.5, "2024-01-01"));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"food":[{"amount":20.5,"date":"2024-01-01"}]}"#);
    }

    #[test]
    fn test_categories_keep_creation_order() {
        let mut ledger = Ledger::new();
        ledger.add_entry("salary", Entry::new(1000.0, "2024-01-01"));
        ledger.add_entry("food", Entry::new(-5.0, "2024-01-02"));
        ledger.add_entry("bills", Entry::new(-50.0, "2024-01-03"));
        ledger.delete_entry("food", 0).unwrap();
        ledger.add_entry("food", Entry::new(-6.0, "2024-01-04"));

        assert_eq!(
            ledger.categories().collect::<Vec<_>>(),
            vec!["salary", "bills", "food"]
        );
        let rows: Vec<String> = ledger.list_all().into_iter().map(|r| r.category).collect();
        assert_eq!(rows, vec!["salary", "bills", "food"]);
    }

    #[test]
    fn test_file_key_order_survives_load_and_save() {
        let ledger: Ledger = serde_json::from_str(
            r#"{"salary": [{"amount": 1000, "date": "2024-01-01"}], "food": [{"amount": -5, "date": "2024-01-02"}]}"#,
        )
        .unwrap();
        assert_eq!(ledger.categories().collect::<Vec<_>>(), vec!["salary", "food"]);

        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.find("salary").unwrap() < json.find("food").unwrap());
    }

    #[test]
    fn test_deserialize_drops_empty_categories() {
        let ledger: Ledger =
            serde_json::from_str(r#"{"food": [], "rent": [{"amount": -5, "date": "2024-01-01"}]}"#)
                .unwrap();
        assert!(!ledger.contains_category("food"));
        assert_eq!(ledger.len(), 1);
    }
}

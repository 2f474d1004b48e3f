//! Search and sort over flattened ledger rows
//!
//! Used by the `search` command and the table viewer.

use std::cmp::Ordering;

use crate::models::{Ledger, LedgerRow, SortField};

/// Rows whose date, category or amount contains `query`, case-insensitively
///
/// An empty query matches every row. Input order is preserved.
pub fn filter(rows: &[LedgerRow], query: &str) -> Vec<LedgerRow> {
    rows.iter().filter(|row| row.matches(query)).cloned().collect()
}

/// `filter` applied to the flattened ledger
pub fn filter_ledger(ledger: &Ledger, query: &str) -> Vec<LedgerRow> {
    filter(&ledger.list_all(), query)
}

/// Stable sort by one column
///
/// Rows comparing equal keep their relative order in both directions.
pub fn sort_rows(rows: &mut [LedgerRow], field: SortField, descending: bool) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Owned variant of `sort_rows`
pub fn sort_by(mut rows: Vec<LedgerRow>, field: SortField, descending: bool) -> Vec<LedgerRow> {
    sort_rows(&mut rows, field, descending);
    rows
}

fn compare(a: &LedgerRow, b: &LedgerRow, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.entry.date.cmp(&b.entry.date),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Amount => a.entry.amount.total_cmp(&b.entry.amount),
    }
}

//! Ledger display formatting
//!
//! Plain-text listings for the command line and the interactive menu.

use crate::audit::AuditRecord;
use crate::models::{format_amount, Entry, LedgerRow, Summary};
use crate::services::ImportReport;

/// Format flattened rows as a table with per-category indices
pub fn format_entry_list(rows: &[LedgerRow]) -> String {
    if rows.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:20} {:>5} {:12} {:>12}\n",
        "Category", "Index", "Date", "Amount"
    ));
    output.push_str(&"-".repeat(52));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:20} {:>5} {:12} {:>12}\n",
            truncate(&row.category, 20),
            row.index,
            truncate(&row.entry.date, 12),
            format_amount(row.entry.amount)
        ));
    }

    output
}

/// Format the entries of a single category with their indices
pub fn format_category_entries(category: &str, entries: &[Entry]) -> String {
    let mut output = format!("Transactions for '{}':\n", category);
    for (index, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] Amount: {}, Date: {}\n",
            index,
            format_amount(entry.amount),
            entry.date
        ));
    }
    output
}

/// Format the count/total summary
pub fn format_summary(summary: &Summary) -> String {
    if summary.count == 0 {
        return "No transactions recorded.\n".to_string();
    }
    format!(
        "Summary\n=======\nTotal transactions: {}\nTotal amount:       {}\n",
        summary.count,
        format_amount(summary.total)
    )
}

/// Format the outcome of an import
pub fn format_import_report(report: &ImportReport, source: &str) -> String {
    if report.imported == 0 {
        return format!("No transactions found in {}.\n", source);
    }
    format!(
        "Imported {} transaction(s) from {} into: {}\n",
        report.imported,
        source,
        report.categories_touched.join(", ")
    )
}

/// Format audit records, one per line
pub fn format_history(records: &[AuditRecord]) -> String {
    if records.is_empty() {
        return "No history recorded.\n".to_string();
    }
    let mut output = String::new();
    for record in records {
        output.push_str(&record.describe());
        output.push('\n');
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ledger;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_entry_list(&[]), "No transactions recorded.\n");
    }

    #[test]
    fn test_list_shows_rows() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(-10.0, "2024-01-02"));
        let output = format_entry_list(&ledger.list_all());
        assert!(output.contains("food"));
        assert!(output.contains("-10.0"));
        assert!(output.contains("2024-01-02"));
    }

    #[test]
    fn test_summary() {
        let output = format_summary(&Summary {
            count: 2,
            total: 10.5,
        });
        assert!(output.contains("Total transactions: 2"));
        assert!(output.contains("10.5"));
    }

    #[test]
    fn test_category_entries_are_indexed() {
        let entries = vec![Entry::new(1.0, "2024-01-01"), Entry::new(2.0, "2024-01-02")];
        let output = format_category_entries("food", &entries);
        assert!(output.contains("[0] Amount: 1.0"));
        assert!(output.contains("[1] Amount: 2.0"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("café au lait", 5), "café…");
        assert_eq!(truncate("rent", 5), "rent");
    }
}

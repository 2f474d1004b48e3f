//! Delimited-text import
//!
//! Reads `type,amount,date` lines (no header, no quoting) into entries.
//! The whole file is parsed before anything is applied: one bad line aborts
//! the import and the error names that line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{TallyError, TallyResult};
use crate::models::{normalize_category, parse_amount, Entry, Ledger};

/// A parsed line ready to be appended
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedEntry {
    /// 1-based line number in the source
    pub line: usize,
    pub category: String,
    pub entry: Entry,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Number of entries appended
    pub imported: usize,
    /// Distinct categories that received entries, in first-seen order
    pub categories_touched: Vec<String>,
}

/// Parse delimited text from any reader
///
/// `source_name` is only used in error messages.
pub fn parse_delimited<R: Read>(reader: R, source_name: &str) -> TallyResult<Vec<ImportedEntry>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut parsed = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| {
            let line = e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            TallyError::parse_at(source_name, line, e.to_string())
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        if is_blank(&record) {
            continue;
        }
        parsed.push(parse_record(&record, line, source_name)?);
    }
    Ok(parsed)
}

/// Parse a delimited file from disk
pub fn read_delimited_file(path: &Path) -> TallyResult<Vec<ImportedEntry>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TallyError::FileMissing(path.to_path_buf())
        } else {
            TallyError::Io(format!("Failed to open {}: {}", path.display(), e))
        }
    })?;
    parse_delimited(file, &path.display().to_string())
}

/// Append parsed entries to the ledger
pub fn apply(ledger: &mut Ledger, entries: Vec<ImportedEntry>) -> ImportReport {
    let mut report = ImportReport::default();
    for item in entries {
        if !report.categories_touched.contains(&item.category) {
            report.categories_touched.push(item.category.clone());
        }
        ledger.add_entry(&item.category, item.entry);
        report.imported += 1;
    }
    report
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &str,
    line: usize,
    source_name: &str,
) -> TallyResult<&'r str> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TallyError::parse_at(
            source_name,
            line,
            format!("missing {} field (expected type,amount,date)", name),
        )),
    }
}

fn parse_record(record: &StringRecord, line: usize, source_name: &str) -> TallyResult<ImportedEntry> {
    let category = normalize_category(required_field(record, 0, "type", line, source_name)?);
    let raw_amount = required_field(record, 1, "amount", line, source_name)?;
    let amount = parse_amount(raw_amount).map_err(|_| {
        TallyError::parse_at(source_name, line, format!("invalid amount '{}'", raw_amount))
    })?;
    let date = required_field(record, 2, "date", line, source_name)?;

    Ok(ImportedEntry {
        line,
        category,
        entry: Entry::new(amount, date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn parse(text: &str) -> TallyResult<Vec<ImportedEntry>> {
        parse_delimited(text.as_bytes(), "test.txt")
    }

    #[test]
    fn test_parse_lines() {
        let entries = parse("Food,20.5,2024-01-01\nsalary,1500,2024-01-31\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, "food");
        assert_eq!(entries[0].entry, Entry::new(20.5, "2024-01-01"));
        assert_eq!(entries[1].line, 2);
        assert_eq!(entries[1].entry.amount, 1500.0);
    }

    #[test]
    fn test_fields_are_trimmed_and_extra_fields_ignored() {
        let entries = parse(" rent , -500 , 2024-01-03 ,note\n").unwrap();
        assert_eq!(entries[0].category, "rent");
        assert_eq!(entries[0].entry, Entry::new(-500.0, "2024-01-03"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let entries = parse("food,1,2024-01-01\n\n   \nfood,2,2024-01-02\n").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_bad_amount_names_line() {
        let err = parse("food,1,2024-01-01\nfood,lots,2024-01-02\n").unwrap_err();
        match err {
            TallyError::Parse { line, message, .. } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("lots"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_names_line() {
        let err = parse("food,1,2024-01-01\nfood,2,2024-01-02\nfood,3\n").unwrap_err();
        assert!(matches!(err, TallyError::Parse { line: Some(3), .. }));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_quotes_are_not_special() {
        let entries = parse("\"food\",1,2024-01-01\n").unwrap();
        assert_eq!(entries[0].category, "\"food\"");
    }

    #[test]
    fn test_apply_appends_and_reports() {
        let mut ledger = Ledger::new();
        ledger.add_entry("food", Entry::new(3.0, "2023-12-31"));

        let entries = parse("food,1,2024-01-01\nrent,-5,2024-01-02\nfood,2,2024-01-03\n").unwrap();
        let report = apply(&mut ledger, entries);

        assert_eq!(report.imported, 3);
        assert_eq!(report.categories_touched, vec!["food", "rent"]);
        let food: Vec<f64> = ledger.entries("food").unwrap().iter().map(|e| e.amount).collect();
        assert_eq!(food, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_delimited_file(&temp_dir.path().join("none.txt")).unwrap_err();
        assert!(matches!(err, TallyError::FileMissing(_)));
    }

    #[test]
    fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bank.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "food,12.25,2024-02-01").unwrap();

        let entries = read_delimited_file(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry.amount, 12.25);
    }
}

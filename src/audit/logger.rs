//! Audit logger for the append-only audit log
//!
//! Each record is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{TallyError, TallyResult};

use super::entry::AuditRecord;

/// Handles writing audit records to the audit log file (JSON lines)
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a record as one JSON line
    pub fn log(&self, record: &AuditRecord) -> TallyResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TallyError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(record)
            .map_err(|e| TallyError::Json(format!("Failed to serialize audit record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TallyError::Io(format!("Failed to write audit record: {}", e)))?;

        file.flush()
            .map_err(|e| TallyError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all records, oldest first
    pub fn read_all(&self) -> TallyResult<Vec<AuditRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TallyError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                TallyError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: AuditRecord = serde_json::from_str(&line).map_err(|e| {
                TallyError::parse_at(self.log_path.display().to_string(), line_num + 1, e.to_string())
            })?;

            records.push(record);
        }

        Ok(records)
    }

    /// Read the most recent `count` records
    pub fn read_recent(&self, count: usize) -> TallyResult<Vec<AuditRecord>> {
        let mut all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::Entry;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger
            .log(&AuditRecord::create("food", 0, &Entry::new(5.0, "2024-01-01")))
            .unwrap();

        let records = logger.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, Operation::Create);
        assert_eq!(records[0].category, "food");
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            logger
                .log(&AuditRecord::create("food", i, &Entry::new(i as f64, "2024-01-01")))
                .unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let indices: Vec<_> = recent.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![Some(7), Some(8), Some(9)]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_names_line_number() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditRecord::import("bank.txt", 2)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"garbage\n")
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(matches!(err, TallyError::Parse { line: Some(2), .. }));
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger
            .log(&AuditRecord::delete("rent", 0, &Entry::new(-5.0, "2024-01-01")))
            .unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let records = reopened.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, Operation::Delete);
    }
}

//! Entry model
//!
//! A single recorded amount and date. Entries are never edited in place;
//! an update replaces the whole value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TallyError, TallyResult};

/// One income (positive) or expense (negative) record
///
/// Serializes as `{"amount": <number>, "date": "<string>"}`, which is the
/// on-disk entry schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub amount: f64,
    pub date: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(amount: f64, date: impl Into<String>) -> Self {
        Self {
            amount,
            date: date.into(),
        }
    }

    /// Whether this entry is money coming in
    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", format_amount(self.amount), self.date)
    }
}

/// Parse user-supplied text into a finite amount
///
/// Surrounding whitespace is ignored. Anything that is not a finite number
/// fails with `InvalidAmount` so the caller can ask again.
pub fn parse_amount(input: &str) -> TallyResult<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TallyError::InvalidAmount(trimmed.to_string())),
    }
}

/// Render an amount the way it is written to the storage file
///
/// Integral values keep a trailing `.0` (`-10.0`, not `-10`) so that what a
/// user sees and searches for matches the persisted number.
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < 1e16 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("20.5").unwrap(), 20.5);
        assert_eq!(parse_amount("  -10 ").unwrap(), -10.0);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_amount_rejects_non_numbers() {
        assert!(matches!(
            parse_amount("ten"),
            Err(TallyError::InvalidAmount(s)) if s == "ten"
        ));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(-10.0), "-10.0");
        assert_eq!(format_amount(20.5), "20.5");
        assert_eq!(format_amount(0.0), "0.0");
        assert_eq!(format_amount(1234.25), "1234.25");
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = Entry::new(20.5, "2024-01-01");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"amount":20.5,"date":"2024-01-01"}"#);
    }

    #[test]
    fn test_entry_accepts_integer_amount() {
        let entry: Entry = serde_json::from_str(r#"{"amount": 5, "date": "2024-01-01"}"#).unwrap();
        assert_eq!(entry.amount, 5.0);
        assert!(entry.is_income());
    }
}

// file: src/models/import.rs
// description: decoded spreadsheet rows, per-row validation outcomes and the import report
// reference: internal data structures

use crate::models::member::NewMember;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const COLUMN_NAME: &str = "name";
pub const COLUMN_EMAIL: &str = "email";
pub const COLUMN_BUSINESS_NAME: &str = "businessName";
pub const COLUMN_PHONE: &str = "phone";
pub const COLUMN_CHAPTER_NAME: &str = "chapterName";
pub const COLUMN_MEMBER_ROLE: &str = "memberRole";
pub const COLUMN_MEMBERSHIP_END_DATE: &str = "membershipEndDate";
pub const COLUMN_STATUS: &str = "status";

/// Header contract shared by the decoder, the validator and the template.
pub const IMPORT_COLUMNS: [&str; 8] = [
    COLUMN_NAME,
    COLUMN_EMAIL,
    COLUMN_BUSINESS_NAME,
    COLUMN_PHONE,
    COLUMN_CHAPTER_NAME,
    COLUMN_MEMBER_ROLE,
    COLUMN_MEMBERSHIP_END_DATE,
    COLUMN_STATUS,
];

/// One decoded data row keyed by header name. Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    cells: BTreeMap<String, String>,
}

impl ImportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Raw value of the `name` column, used to label commit failures.
    pub fn display_name(&self) -> &str {
        self.get(COLUMN_NAME).unwrap_or("")
    }
}

/// 1-based row number as shown in the spreadsheet (header occupies row 1).
pub fn reported_row_number(index: usize) -> usize {
    index + 2
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefect {
    pub row: usize,
    pub message: String,
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(NewMember),
    Invalid(Vec<RowDefect>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

/// Aggregate report of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.success as f64 / total as f64) * 100.0
    }

    /// The first `limit` errors and how many were left out.
    pub fn visible_errors(&self, limit: usize) -> (&[String], usize) {
        let shown = self.errors.len().min(limit);
        (&self.errors[..shown], self.errors.len() - shown)
    }

    pub fn summary(&self) -> String {
        if self.failed > 0 {
            format!(
                "Successfully imported {} members ({} failed).",
                self.success, self.failed
            )
        } else {
            format!("Successfully imported {} members.", self.success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_row_number_accounts_for_header() {
        assert_eq!(reported_row_number(0), 2);
        assert_eq!(reported_row_number(1), 3);
    }

    #[test]
    fn test_defect_display() {
        let defect = RowDefect {
            row: 3,
            message: "Valid email is required".to_string(),
        };
        assert_eq!(defect.to_string(), "Row 3: Valid email is required");
    }

    #[test]
    fn test_visible_errors_truncation() {
        let result = ImportResult {
            success: 0,
            failed: 12,
            errors: (0..12).map(|i| format!("error {}", i)).collect(),
        };

        let (shown, hidden) = result.visible_errors(10);
        assert_eq!(shown.len(), 10);
        assert_eq!(hidden, 2);

        let (shown, hidden) = result.visible_errors(50);
        assert_eq!(shown.len(), 12);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_summary_and_rate() {
        let result = ImportResult {
            success: 3,
            failed: 1,
            errors: vec!["x".to_string()],
        };
        assert_eq!(result.summary(), "Successfully imported 3 members (1 failed).");
        assert_eq!(result.total(), 4);
        assert!((result.success_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(ImportResult::new().success_rate(), 0.0);
    }

    #[test]
    fn test_row_accessors() {
        let row = ImportRow::from_pairs([("name", "Jane"), ("email", "jane@example.com")]);
        assert_eq!(row.get("name"), Some("Jane"));
        assert_eq!(row.get("phone"), None);
        assert_eq!(row.display_name(), "Jane");
        assert_eq!(row.columns().count(), 2);
    }
}

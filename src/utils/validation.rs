// file: src/utils/validation.rs
// description: field-level predicates and input file checks
// reference: input validation patterns

use crate::error::{ImportError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    pub static ref EMAIL: Regex = Regex::new(r"(?i)^\S+@\S+$").expect("EMAIL regex is valid");

    pub static ref PHONE: Regex =
        Regex::new(r"^[\d\s\-\+\(\)]+$").expect("PHONE regex is valid");
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            ImportError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(ImportError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_file_size(size: u64, max_size_mb: usize) -> Result<()> {
        let max_bytes = (max_size_mb as u64) * 1_048_576;
        if size > max_bytes {
            return Err(ImportError::Validation(format!(
                "File too large: {} bytes (max {} MB)",
                size, max_size_mb
            )));
        }
        Ok(())
    }

    pub fn is_valid_email(value: &str) -> bool {
        EMAIL.is_match(value)
    }

    pub fn is_valid_phone(value: &str) -> bool {
        PHONE.is_match(value)
    }

    /// Lenient calendar date parsing over the forms operators type into spreadsheets.
    pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        {
            return Some(date);
        }

        if let Some(datetime) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        {
            return Some(datetime.date());
        }

        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("members.xlsx");
        fs::write(&file_path, "test").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(Validator::validate_file_size(1024, 1).is_ok());
        assert!(Validator::validate_file_size(1_048_576, 1).is_ok());
        assert!(Validator::validate_file_size(1_048_577, 1).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(Validator::is_valid_email("john.doe@example.com"));
        assert!(Validator::is_valid_email("a@b"));
        assert!(!Validator::is_valid_email("not-an-email"));
        assert!(!Validator::is_valid_email("john doe@example.com"));
        assert!(!Validator::is_valid_email(""));
    }

    #[test]
    fn test_phone_characters() {
        assert!(Validator::is_valid_phone("+1-555-0123"));
        assert!(Validator::is_valid_phone("(555) 012 3456"));
        assert!(!Validator::is_valid_phone("555-CALL-NOW"));
        assert!(!Validator::is_valid_phone(""));
    }

    #[test]
    fn test_calendar_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(Validator::parse_calendar_date("2024-12-31"), expected);
        assert_eq!(Validator::parse_calendar_date("2024/12/31"), expected);
        assert_eq!(Validator::parse_calendar_date("12/31/2024"), expected);
        assert_eq!(Validator::parse_calendar_date("2024-12-31T10:00:00"), expected);
        assert_eq!(
            Validator::parse_calendar_date("2024-12-31T10:00:00+00:00"),
            expected
        );
        assert_eq!(Validator::parse_calendar_date("2024-02-30"), None);
        assert_eq!(Validator::parse_calendar_date("next year"), None);
        assert_eq!(Validator::parse_calendar_date(""), None);
    }
}

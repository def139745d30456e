// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that end an invocation before or instead of producing an `ImportResult`.
/// Per-row problems never surface here; they are folded into the result.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid file type: {0}. Please select an Excel file (.xlsx or .xls) or a CSV file")]
    UnsupportedFileType(String),

    #[error("Failed to decode spreadsheet: {0}")]
    Decode(String),

    #[error("Excel file is empty or has no valid data")]
    EmptyFile,

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Membership store error: {0}")]
    Store(#[from] StoreError),

    #[error("Template generation failed: {0}")]
    Template(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by the membership store for a single request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl ImportError {
    /// Whether the error is the terminal decode class (unreadable or empty input).
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ImportError::Decode(_) | ImportError::EmptyFile | ImportError::UnsupportedFileType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_message() {
        assert_eq!(
            ImportError::EmptyFile.to_string(),
            "Excel file is empty or has no valid data"
        );
        assert!(ImportError::EmptyFile.is_decode_error());
    }

    #[test]
    fn test_store_error_passthrough() {
        let err: ImportError = StoreError::Rejected("duplicate key".to_string()).into();
        assert_eq!(err.to_string(), "Membership store error: duplicate key");
        assert!(!err.is_decode_error());
    }
}

// file: src/exporter/json.rs
// description: json export of import run reports

use crate::error::{ImportError, Result};
use crate::models::ImportResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported_at: String,
    pub source_file: String,
    pub dry_run: bool,
    #[serde(flatten)]
    pub result: ImportResult,
}

impl ImportReport {
    pub fn new(source_file: impl Into<String>, dry_run: bool, result: ImportResult) -> Self {
        Self {
            imported_at: Utc::now().to_rfc3339(),
            source_file: source_file.into(),
            dry_run,
            result,
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export(&self, report: &ImportReport, pretty: bool) -> Result<PathBuf> {
        let file_name = format!(
            "import_report_{}.json",
            Utc::now().format("%Y%m%dT%H%M%S%.3f")
        );
        let path = self.output_dir.join(file_name);

        let body = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        fs::write(&path, body).map_err(|source| ImportError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!(
            "Report written to {} ({} ok, {} failed)",
            path.display(),
            report.result.success,
            report.result.failed
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("reports"));
        assert!(exporter.is_ok());
        assert!(dir.path().join("reports").is_dir());
    }

    #[test]
    fn test_export_writes_flattened_result() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let report = ImportReport::new(
            "members.xlsx",
            false,
            ImportResult {
                success: 2,
                failed: 1,
                errors: vec!["Row 3: Valid email is required".to_string()],
            },
        );

        let path = exporter.export(&report, true).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["source_file"], "members.xlsx");
        assert_eq!(value["success"], 2);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["errors"][0], "Row 3: Valid email is required");
        assert_eq!(value["dry_run"], false);
    }
}

// file: src/template/mod.rs
// description: downloadable import template with the expected headers and one example row
// reference: header contract shared with the decoder

mod xlsx;

use crate::error::{ImportError, Result};
use crate::models::IMPORT_COLUMNS;
use crate::parser::SheetFormat;
use std::fs;
use std::path::Path;
use tracing::info;

pub const TEMPLATE_SHEET_NAME: &str = "Members Template";
pub const DEFAULT_TEMPLATE_FILE: &str = "member_import_template.xlsx";

const COLUMN_WIDTHS: [u32; 8] = [20, 25, 20, 15, 20, 15, 18, 10];

const EXAMPLE_ROW: [&str; 8] = [
    "John Doe",
    "john.doe@example.com",
    "Doe Enterprises",
    "+1-555-0123",
    "Downtown Chapter",
    "regular",
    "2024-12-31",
    "active",
];

pub fn generate_template(format: SheetFormat) -> Result<Vec<u8>> {
    match format {
        SheetFormat::Xlsx => {
            let rows: [&[&str]; 2] = [&IMPORT_COLUMNS, &EXAMPLE_ROW];
            xlsx::write_workbook(&xlsx::SheetSpec {
                name: TEMPLATE_SHEET_NAME,
                widths: &COLUMN_WIDTHS,
                rows: &rows,
            })
        }
        SheetFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in [IMPORT_COLUMNS, EXAMPLE_ROW] {
                writer
                    .write_record(record)
                    .map_err(|e| ImportError::Template(e.to_string()))?;
            }
            writer
                .into_inner()
                .map_err(|e| ImportError::Template(e.to_string()))
        }
        other => Err(ImportError::Template(format!(
            "templates can only be written as xlsx or csv, not {}",
            other
        ))),
    }
}

pub fn write_template(path: &Path, format: SheetFormat) -> Result<()> {
    let bytes = generate_template(format)?;
    fs::write(path, &bytes).map_err(|source| ImportError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Template written to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chapter, Status};
    use crate::parser::{SpreadsheetDecoder, TabularDecoder};
    use crate::pipeline::validate_rows;
    use tempfile::TempDir;

    fn assert_template_row(format: SheetFormat) {
        let bytes = generate_template(format).unwrap();
        let rows = SpreadsheetDecoder::new(format).decode(&bytes).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        let mut columns: Vec<_> = row.columns().collect();
        let mut expected = IMPORT_COLUMNS.to_vec();
        columns.sort_unstable();
        expected.sort_unstable();
        assert_eq!(columns, expected);
        assert_eq!(row.get("email"), Some("john.doe@example.com"));
        assert_eq!(row.get("membershipEndDate"), Some("2024-12-31"));

        let chapters = vec![Chapter::new("Downtown Chapter", Status::Active)];
        let report = validate_rows(&rows, &chapters);
        assert_eq!(report.valid.len(), 1, "{:?}", report.defects);
    }

    #[test]
    fn test_xlsx_template_decodes_to_example_row() {
        assert_template_row(SheetFormat::Xlsx);
    }

    #[test]
    fn test_csv_template_decodes_to_example_row() {
        assert_template_row(SheetFormat::Csv);
    }

    #[test]
    fn test_csv_header_line_is_exact() {
        let bytes = generate_template(SheetFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("name,email,businessName,phone,chapterName,memberRole,membershipEndDate,status")
        );
    }

    #[test]
    fn test_unsupported_template_format() {
        assert!(generate_template(SheetFormat::Xls).is_err());
    }

    #[test]
    fn test_write_template_to_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_TEMPLATE_FILE);
        write_template(&path, SheetFormat::Xlsx).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}

// file: src/parser/spreadsheet.rs
// description: decodes the first worksheet of an upload into header-keyed rows
// reference: https://docs.rs/calamine, https://docs.rs/csv

use crate::error::{ImportError, Result};
use crate::models::ImportRow;
use crate::parser::format::SheetFormat;
use calamine::{Data, DataType, Ods, Range, Reader, Xls, Xlsx};
use std::io::Cursor;
use tracing::debug;

type Upload = Cursor<Vec<u8>>;

/// Reads an uploaded blob into ordered rows keyed by header column names.
pub trait TabularDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<Vec<ImportRow>>;
}

#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetDecoder {
    format: SheetFormat,
}

impl SpreadsheetDecoder {
    pub fn new(format: SheetFormat) -> Self {
        Self { format }
    }
}

impl TabularDecoder for SpreadsheetDecoder {
    fn decode(&self, data: &[u8]) -> Result<Vec<ImportRow>> {
        let rows = match self.format {
            SheetFormat::Xlsx => rows_from_range(&first_sheet::<Xlsx<Upload>>(data)?),
            SheetFormat::Xls => rows_from_range(&first_sheet::<Xls<Upload>>(data)?),
            SheetFormat::Ods => rows_from_range(&first_sheet::<Ods<Upload>>(data)?),
            SheetFormat::Csv => rows_from_csv(data)?,
        };

        debug!("Decoded {} data rows from {} upload", rows.len(), self.format);
        Ok(rows)
    }
}

fn first_sheet<R>(data: &[u8]) -> Result<Range<Data>>
where
    R: Reader<Upload>,
    R::Error: std::fmt::Display,
{
    let mut workbook =
        R::new(Cursor::new(data.to_vec())).map_err(|e| ImportError::Decode(e.to_string()))?;

    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Decode("No worksheet found".to_string()))?
        .map_err(|e| ImportError::Decode(e.to_string()))
}

fn rows_from_range(range: &Range<Data>) -> Vec<ImportRow> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header.iter().map(header_name).collect();

    rows.filter_map(|cells| {
        let mut row = ImportRow::new();
        for (column, cell) in headers.iter().zip(cells) {
            if let Some(column) = column
                && let Some(value) = cell_text(cell)
            {
                row.insert(column.clone(), value);
            }
        }
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

fn header_name(cell: &Data) -> Option<String> {
    cell_text(cell)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // integral floats come from numeric phone cells and ids
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell.as_date()?.format("%Y-%m-%d").to_string(),
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    };

    (!text.is_empty()).then_some(text)
}

fn rows_from_csv(data: &[u8]) -> Result<Vec<ImportRow>> {
    let text = std::str::from_utf8(data)
        .map_err(|e| ImportError::Decode(format!("CSV is not valid UTF-8: {}", e)))?;
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Decode(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ImportError::Decode(format!("Malformed CSV record: {}", e)))?;

        let mut row = ImportRow::new();
        for (column, value) in headers.iter().zip(record.iter()) {
            if !column.is_empty() && !value.is_empty() {
                row.insert(column.clone(), value);
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

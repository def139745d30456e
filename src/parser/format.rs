// file: src/parser/format.rs
// description: upload format detection from file extension and magic bytes

use crate::error::{ImportError, Result};
use std::fmt;
use std::path::Path;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl SheetFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(SheetFormat::Xlsx),
            "xls" => Some(SheetFormat::Xls),
            "ods" => Some(SheetFormat::Ods),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }

    pub fn from_magic(data: &[u8]) -> Option<Self> {
        if data.starts_with(&ZIP_MAGIC) {
            Some(SheetFormat::Xlsx)
        } else if data.starts_with(&OLE_MAGIC) {
            Some(SheetFormat::Xls)
        } else {
            None
        }
    }

    /// Extension wins; content sniffing only covers files without a usable extension.
    pub fn detect(path: &Path, data: &[u8]) -> Result<Self> {
        let extension = path.extension().and_then(|e| e.to_str());

        if let Some(format) = extension.and_then(Self::from_extension) {
            return Ok(format);
        }

        if extension.is_none()
            && let Some(format) = Self::from_magic(data)
        {
            return Ok(format);
        }

        Err(ImportError::UnsupportedFileType(path.display().to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Xls => "xls",
            SheetFormat::Ods => "ods",
            SheetFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

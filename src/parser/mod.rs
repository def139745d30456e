// file: src/parser/mod.rs
// description: spreadsheet decoding module exports
// reference: internal module structure

pub mod format;
pub mod spreadsheet;

pub use format::SheetFormat;
pub use spreadsheet::{SpreadsheetDecoder, TabularDecoder};

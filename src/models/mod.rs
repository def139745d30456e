// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod chapter;
pub mod import;
pub mod member;

pub use chapter::Chapter;
pub use import::{
    IMPORT_COLUMNS, ImportResult, ImportRow, RowDefect, ValidationOutcome, reported_row_number,
};
pub use member::{Member, MemberRole, NewMember, Status};

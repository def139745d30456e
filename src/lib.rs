// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod database;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod template;
pub mod utils;

pub use config::{Config, ImportConfig, StoreConfig};
pub use database::{
    ChapterDirectory, InMemoryMembershipStore, MemberCreator, RestMembershipStore,
};
pub use error::{ImportError, Result, StoreError};
pub use exporter::{ImportReport, JsonExporter};
pub use models::{Chapter, ImportResult, ImportRow, Member, MemberRole, NewMember, Status};
pub use parser::{SheetFormat, SpreadsheetDecoder, TabularDecoder};
pub use pipeline::{
    ImportPipeline, ImportProgress, ProgressReporter, ProgressTracker, ValidationReport,
};
pub use template::{generate_template, write_template};
pub use utils::{HealthCheck, HealthStatus, OperationTimer, Validator};

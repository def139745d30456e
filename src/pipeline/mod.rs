// file: src/pipeline/mod.rs
// description: import pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;
mod validator;

pub use orchestrator::{ImportPipeline, SilentProgress};
pub use progress::{ImportProgress, ProgressReporter, ProgressTracker};
pub use validator::{RowValidator, ValidRow, ValidationReport, validate_rows};

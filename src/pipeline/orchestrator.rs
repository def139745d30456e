// file: src/pipeline/orchestrator.rs
// description: decode, validate-all, then commit sequentially and report per-row outcomes
// reference: orchestrates the bulk member import workflow

use crate::database::{ChapterDirectory, MemberCreator};
use crate::error::{ImportError, Result};
use crate::models::{Chapter, ImportResult, ImportRow};
use crate::parser::TabularDecoder;
use crate::pipeline::progress::{ImportProgress, ProgressReporter};
use crate::pipeline::validator::{ValidationReport, validate_rows};
use crate::utils::OperationTimer;
use tracing::{debug, info, warn};

/// Reporter used when the caller does not observe progress.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn report(&self, _progress: ImportProgress) {}
}

pub struct ImportPipeline<'a> {
    decoder: &'a dyn TabularDecoder,
    creator: &'a dyn MemberCreator,
    progress: &'a dyn ProgressReporter,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(decoder: &'a dyn TabularDecoder, creator: &'a dyn MemberCreator) -> Self {
        Self {
            decoder,
            creator,
            progress: &SilentProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Decodes the upload; an unreadable file or one without data rows is terminal.
    pub fn decode(&self, file: &[u8]) -> Result<Vec<ImportRow>> {
        let rows = self.decoder.decode(file)?;
        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        Ok(rows)
    }

    /// Decode and validate without committing anything.
    pub fn validate(&self, file: &[u8], chapters: &[Chapter]) -> Result<ValidationReport> {
        let rows = self.decode(file)?;
        Ok(validate_rows(&rows, chapters))
    }

    pub async fn run_import(&self, file: &[u8], chapters: &[Chapter]) -> Result<ImportResult> {
        let timer = OperationTimer::new("member import");

        let rows = self.decode(file)?;
        info!("Decoded {} data rows", rows.len());

        let validation = validate_rows(&rows, chapters);
        info!(
            "Validation complete: {} valid, {} invalid",
            validation.valid.len(),
            validation.invalid_rows
        );
        timer.checkpoint("validation pass");

        let result = self.commit(validation).await;

        timer.finish_with_count(result.success);
        Ok(result)
    }

    /// Fetches the chapter directory first; an unavailable directory aborts the run.
    pub async fn run_import_with_directory(
        &self,
        file: &[u8],
        directory: &dyn ChapterDirectory,
    ) -> Result<ImportResult> {
        let chapters = directory.list_chapters().await?;
        debug!("Loaded {} chapters for validation", chapters.len());
        self.run_import(file, &chapters).await
    }

    async fn commit(&self, validation: ValidationReport) -> ImportResult {
        let mut result = ImportResult {
            success: 0,
            failed: validation.invalid_rows,
            errors: validation.error_messages(),
        };

        let mut progress = ImportProgress {
            total: validation.valid.len(),
            ..ImportProgress::default()
        };

        if progress.total == 0 {
            info!("No valid rows to commit");
            self.progress.report(progress);
            return result;
        }

        for row in validation.valid {
            match self.creator.create(&row.member).await {
                Ok(member) => {
                    debug!("Row {} committed as {}", row.row_number, member.id);
                    result.success += 1;
                    progress.committed += 1;
                }
                Err(e) => {
                    warn!("Row {} failed to commit: {}", row.row_number, e);
                    result.failed += 1;
                    progress.failed += 1;
                    result
                        .errors
                        .push(format!("Failed to import {}: {}", row.label, e));
                }
            }

            progress.attempted += 1;
            self.progress.report(progress);
        }

        result
    }
}

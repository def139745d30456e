// file: src/pipeline/progress.rs
// description: commit-pass progress signal and its terminal rendering
// reference: uses indicatif for progress bars

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Snapshot emitted after every commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportProgress {
    pub attempted: usize,
    pub total: usize,
    pub committed: usize,
    pub failed: usize,
}

impl ImportProgress {
    /// Percentage of valid rows attempted. An empty commit pass is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.attempted as f64 / self.total as f64) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.attempted >= self.total
    }
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: ImportProgress);
}

impl<F> ProgressReporter for F
where
    F: Fn(ImportProgress) + Send + Sync,
{
    fn report(&self, progress: ImportProgress) {
        self(progress)
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::with_color(true)
    }

    pub fn with_color(colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
        }
    }

    pub fn finish(&self) {
        if self.main_bar.is_finished() {
            return;
        }
        self.main_bar.finish_with_message("Import complete");
        self.detail_bar.finish_and_clear();
    }

    /// Stops the bars in place after a fatal error.
    pub fn abandon(&self, message: &str) {
        if self.main_bar.is_finished() {
            return;
        }
        self.main_bar.abandon_with_message(message.to_string());
        self.detail_bar.finish_and_clear();
    }

    pub fn is_finished(&self) -> bool {
        self.main_bar.is_finished()
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressTracker {
    fn report(&self, progress: ImportProgress) {
        self.main_bar.set_length(progress.total as u64);
        self.main_bar.set_position(progress.attempted as u64);
        if progress.is_complete() {
            self.main_bar.set_message("all rows attempted");
        } else {
            self.main_bar
                .set_message(format!("{:.0}% complete", progress.percent()));
        }
        self.detail_bar.set_message(format!(
            "Committed: {} | Failed: {}",
            progress.committed, progress.failed
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

/// Records every snapshot it receives.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ProgressLog {
    updates: std::sync::Mutex<Vec<ImportProgress>>,
}

#[cfg(test)]
impl ProgressLog {
    pub(crate) fn updates(&self) -> Vec<ImportProgress> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn percents(&self) -> Vec<f64> {
        self.updates().iter().map(ImportProgress::percent).collect()
    }
}

#[cfg(test)]
impl ProgressReporter for ProgressLog {
    fn report(&self, progress: ImportProgress) {
        self.updates.lock().unwrap().push(progress);
    }
}

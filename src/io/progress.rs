//! Progress display for batch generation

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BAR_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>24}} [{{bar:{PROGRESS_BAR_WIDTH}.green/white}}] {{pos:>4}}/{{len}} bars"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Patterns: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Shows bars generated per seed file, plus a batch total for large batches
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
        }
    }

    /// Prepare the display for `file_count` seed files
    pub fn initialize(&mut self, file_count: usize) {
        // A batch total only helps once individual files scroll away
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start tracking a file that will produce `bars` bars
    pub fn start_file(&mut self, path: &Path, bars: usize) {
        if let Some(previous) = self.file_bar.take() {
            previous.finish_and_clear();
        }

        let bar = ProgressBar::new(bars as u64);
        bar.set_style(BAR_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.file_bar = Some(self.multi_progress.add(bar));
    }

    /// Report that `bar` bars of the current file are done
    pub fn update_bar(&self, bar: usize) {
        if let Some(ref file_bar) = self.file_bar {
            file_bar.set_position(bar as u64);
        }
    }

    /// Mark the current file as completed
    pub fn complete_file(&mut self) {
        if let Some(file_bar) = self.file_bar.take() {
            file_bar.finish();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All patterns processed");
        }
        let _ = self.multi_progress.clear();
    }
}

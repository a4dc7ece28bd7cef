//! Per-stage progress bars for a pipeline run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:<22}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} [{{elapsed_precise}}]"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per pipeline stage
///
/// Finished stages stay on screen until [`ProgressManager::finish`].
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bar: Option<ProgressBar>,
    stages_completed: usize,
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
            stage_bar: None,
            stages_completed: 0,
        }
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            stage_bar: None,
            stages_completed: 0,
        }
    }

    /// Start a stage of `len` steps, completing any stage still running
    pub fn start_stage(&mut self, label: &str, len: usize) {
        self.finish_stage();

        let bar = ProgressBar::new(len as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_message(label.to_string());
        self.stage_bar = Some(self.multi_progress.add(bar));
    }

    /// Advance the running stage by one step
    pub fn advance(&self) {
        if let Some(ref bar) = self.stage_bar {
            bar.inc(1);
        }
    }

    /// Position of the running stage, if any
    pub fn position(&self) -> Option<u64> {
        self.stage_bar.as_ref().map(ProgressBar::position)
    }

    /// Mark the running stage as done
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.stage_bar.take() {
            bar.finish();
            self.stages_completed += 1;
        }
    }

    /// Number of stages finished so far
    pub const fn stages_completed(&self) -> usize {
        self.stages_completed
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_stage();
        let _ = self.multi_progress.clear();
    }
}

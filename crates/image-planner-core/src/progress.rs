use std::path::Path;

/// Trait for reporting run progress, one callback per pipeline stage.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_images_listed(&self, _images: usize, _duration_secs: f64) {}
    fn on_prior_data_missing(&self, _path: &Path) {}
    fn on_reconciled(&self, _prior: usize, _lost: usize) {}
    fn on_plan_written(&self, _path: &Path, _rows: usize) {}
    fn on_lost_written(&self, _path: &Path, _rows: usize) {}
    fn on_report_written(&self, _path: &Path, _nodes: usize) {}
    fn on_report_skipped(&self) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

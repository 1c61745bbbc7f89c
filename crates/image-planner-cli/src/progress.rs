use colored::*;
use image_planner_core::ProgressReporter;
use std::path::Path;

/// Prints one check line per finished stage to stderr.
pub struct CliReporter;

impl CliReporter {
    fn done(&self, message: String) {
        eprintln!("  {} {}", "✓".green(), message);
    }
}

impl ProgressReporter for CliReporter {
    fn on_images_listed(&self, images: usize, duration_secs: f64) {
        self.done(format!("{} images parsed in {:.2}s", images, duration_secs));
    }

    fn on_prior_data_missing(&self, path: &Path) {
        eprintln!(
            "  {} No plan data at {}, starting from 0%",
            "•".yellow(),
            path.display()
        );
    }

    fn on_reconciled(&self, prior: usize, lost: usize) {
        let lost = if lost > 0 {
            format!("{}", lost).red()
        } else {
            format!("{}", lost).normal()
        };
        self.done(format!("{} recorded items merged, {} lost", prior, lost));
    }

    fn on_plan_written(&self, path: &Path, rows: usize) {
        self.done(format!("Plan data written: {} rows to {}", rows, path.display()));
    }

    fn on_lost_written(&self, path: &Path, rows: usize) {
        if rows > 0 {
            self.done(format!("Lost items written: {} rows to {}", rows, path.display()));
        }
    }

    fn on_report_written(&self, path: &Path, nodes: usize) {
        self.done(format!("Report written: {} rows to {}", nodes, path.display()));
    }

    fn on_report_skipped(&self) {
        eprintln!("  {} Report generation disabled", "•".yellow());
    }
}

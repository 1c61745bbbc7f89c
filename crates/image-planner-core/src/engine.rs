use crate::analysis::{self, Report};
use crate::config::{AppConfig, PlanPaths};
use crate::error::Result;
use crate::model::{Percentage, PlanItem};
use crate::plan::{self, Reconciliation};
use crate::progress::ProgressReporter;
use crate::report::HtmlReportWriter;
use crate::scanner;
use crate::storage;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct PlanEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct RunResult {
    pub items: usize,
    pub lost_items: usize,
    pub report_nodes: usize,
    pub points: usize,
    pub percentage: Percentage,
    pub data_file: PathBuf,
    pub lost_file: PathBuf,
    /// `None` when report generation is switched off.
    pub report_file: Option<PathBuf>,
    pub duration: Duration,
}

impl PlanEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline on one data directory:
    /// 1. List and parse the images
    /// 2. Carry recorded completion over from the previous data file, if any
    /// 3. Build the report tree and global stats
    /// 4. Write the plan and lost items, then the HTML report
    ///
    /// Everything that can reject the input happens before the first write.
    pub fn run(&self, data_dir: &Path, reporter: &dyn ProgressReporter) -> Result<RunResult> {
        let start = Instant::now();
        let paths = self.config.resolve(data_dir);
        info!("Read images from: {}", paths.images_dir.display());

        let list_start = Instant::now();
        let names =
            scanner::list_image_names(&paths.images_dir, &self.config.ignore_patterns)?;
        let items = plan::parse_all(&names)?;
        reporter.on_images_listed(items.len(), list_start.elapsed().as_secs_f64());
        info!("Read images success, with {} items.", items.len());

        let reconciliation = self.reconcile_with_prior(items, &paths, reporter)?;

        let report = analysis::build_report(&reconciliation.merged, &self.config.image_url_prefix)?;
        debug!(
            "Report has {} nodes, {} points, {}% complete",
            report.items.len(),
            report.points,
            report.percentage
        );

        let rows = storage::write_plan(&paths.data_file, &reconciliation.merged)?;
        reporter.on_plan_written(&paths.data_file, rows);
        info!("Write new plan data to '{}' success.", paths.data_file.display());

        let lost_rows = storage::write_lost(&paths.lost_file, &reconciliation.lost)?;
        reporter.on_lost_written(&paths.lost_file, lost_rows);

        let report_file = if self.config.generate_report {
            write_report(&paths.report_file, &report)?;
            reporter.on_report_written(&paths.report_file, report.items.len());
            info!("Write plan report to '{}' success.", paths.report_file.display());
            Some(paths.report_file.clone())
        } else {
            reporter.on_report_skipped();
            debug!("Report generation disabled");
            None
        };

        Ok(RunResult {
            items: reconciliation.merged.len(),
            lost_items: reconciliation.lost.len(),
            report_nodes: report.items.len(),
            points: report.points,
            percentage: report.percentage,
            data_file: paths.data_file,
            lost_file: paths.lost_file,
            report_file,
            duration: start.elapsed(),
        })
    }

    fn reconcile_with_prior(
        &self,
        items: Vec<PlanItem>,
        paths: &PlanPaths,
        reporter: &dyn ProgressReporter,
    ) -> Result<Reconciliation> {
        match storage::read_prior(&paths.data_file)? {
            Some(prior) => {
                let reconciliation = plan::reconcile(items, &prior);
                reporter.on_reconciled(prior.len(), reconciliation.lost.len());
                info!(
                    "Read plan state success, with {} items, and {} items are lost.",
                    prior.len(),
                    reconciliation.lost.len()
                );
                Ok(reconciliation)
            }
            None => {
                reporter.on_prior_data_missing(&paths.data_file);
                Ok(Reconciliation {
                    merged: items,
                    lost: Vec::new(),
                })
            }
        }
    }
}

/// A failed render leaves any previous report in place.
fn write_report(path: &Path, report: &Report) -> Result<()> {
    storage::write_atomically(path, |out| HtmlReportWriter::new(out).write_report(report))
}

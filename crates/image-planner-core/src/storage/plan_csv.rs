use crate::error::{Error, Result};
use crate::model::{Completion, PlanItem};
use crate::storage::atomic::write_atomically;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const PLAN_COLUMNS: [&str; 8] = [
    "file_name",
    "main_module",
    "sub_module",
    "task_name",
    "percent01_ui",
    "percent02_biz",
    "percent03_ue",
    "percent04_misc",
];

/// One persisted plan row. Blank percentage cells read as 0.
#[derive(Debug, Serialize, Deserialize)]
struct PlanRow {
    file_name: String,
    #[serde(default)]
    main_module: String,
    #[serde(default)]
    sub_module: String,
    #[serde(default)]
    task_name: String,
    percent01_ui: Option<f64>,
    percent02_biz: Option<f64>,
    percent03_ue: Option<f64>,
    percent04_misc: Option<f64>,
}

impl From<&PlanItem> for PlanRow {
    fn from(item: &PlanItem) -> Self {
        PlanRow {
            file_name: item.file_name.clone(),
            main_module: item.main_module.clone(),
            sub_module: item.sub_module.clone(),
            task_name: item.task_name.clone(),
            percent01_ui: Some(item.completion.ui),
            percent02_biz: Some(item.completion.business),
            percent03_ue: Some(item.completion.experience),
            percent04_misc: Some(item.completion.misc),
        }
    }
}

impl PlanRow {
    fn into_item(self) -> std::result::Result<PlanItem, String> {
        if self.file_name.trim().is_empty() {
            return Err("empty file_name".to_string());
        }

        let completion = Completion::new(
            checked_ratio("percent01_ui", self.percent01_ui)?,
            checked_ratio("percent02_biz", self.percent02_biz)?,
            checked_ratio("percent03_ue", self.percent03_ue)?,
            checked_ratio("percent04_misc", self.percent04_misc)?,
        );

        Ok(PlanItem {
            file_name: self.file_name,
            main_module: self.main_module,
            sub_module: self.sub_module,
            task_name: self.task_name,
            completion,
        })
    }
}

fn checked_ratio(column: &str, value: Option<f64>) -> std::result::Result<f64, String> {
    let value = value.unwrap_or(0.0);
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} = {} is outside [0, 1]", column, value))
    }
}

/// Read previously recorded plan rows. `Ok(None)` when no data file exists yet.
pub fn read_prior(path: &Path) -> Result<Option<Vec<PlanItem>>> {
    if !path.exists() {
        debug!("No prior plan data at {}", path.display());
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::prior_data(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::prior_data(path, e.to_string()))?
        .clone();

    let mut items = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| Error::prior_data(path, e.to_string()))?;
        if !more {
            break;
        }

        // A quoted cell may span lines, so ask the record where it starts
        let line = record.position().map_or(0, |pos| pos.line());
        let row: PlanRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::prior_data(path, format!("line {}: {}", line, e)))?;
        let item = row
            .into_item()
            .map_err(|reason| Error::prior_data(path, format!("line {}: {}", line, reason)))?;
        items.push(item);
    }

    debug!("Read {} prior plan rows from {}", items.len(), path.display());
    Ok(Some(items))
}

pub fn write_plan(path: &Path, items: &[PlanItem]) -> Result<usize> {
    write_rows(path, items)
}

pub fn write_lost(path: &Path, items: &[PlanItem]) -> Result<usize> {
    write_rows(path, items)
}

/// Written through a temporary file, so a failed write never leaves a
/// truncated plan behind.
fn write_rows(path: &Path, items: &[PlanItem]) -> Result<usize> {
    write_atomically(path, |out| {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
        writer.write_record(PLAN_COLUMNS)?;
        for item in items {
            writer.serialize(PlanRow::from(item))?;
        }
        writer.flush()?;
        Ok(())
    })?;

    debug!("Wrote {} rows to {}", items.len(), path.display());
    Ok(items.len())
}

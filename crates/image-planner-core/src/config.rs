use crate::error::{Error, Result};
use config::{Config, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Layout and options of one data directory. Every field has a default, so an
/// absent `Config.toml` means the standard layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub images_dir: String,
    pub data_file: String,
    pub lost_file: String,
    pub report_file: String,
    pub image_url_prefix: String,
    pub generate_report: bool,
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            images_dir: "images".to_string(),
            data_file: "plan.csv".to_string(),
            lost_file: "plan-lost.csv".to_string(),
            report_file: "plan.html".to_string(),
            image_url_prefix: "images/".to_string(),
            generate_report: true,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Concrete locations for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanPaths {
    pub images_dir: PathBuf,
    pub data_file: PathBuf,
    pub lost_file: PathBuf,
    pub report_file: PathBuf,
}

impl AppConfig {
    pub fn resolve(&self, data_dir: &Path) -> PlanPaths {
        PlanPaths {
            images_dir: data_dir.join(&self.images_dir),
            data_file: data_dir.join(&self.data_file),
            lost_file: data_dir.join(&self.lost_file),
            report_file: data_dir.join(&self.report_file),
        }
    }
}

/// Check the data directory, then load the optional `Config` file inside it.
pub fn load_configuration(data_dir: &Path) -> Result<AppConfig> {
    validate_data_dir(data_dir)?;

    let config_base = data_dir.join("Config");
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(&config_base.to_string_lossy()).required(false))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

pub fn validate_data_dir(data_dir: &Path) -> Result<()> {
    if !data_dir.exists() {
        return Err(Error::MissingDirectory(data_dir.to_path_buf()));
    }
    if !data_dir.is_dir() {
        return Err(Error::NotADirectory(data_dir.to_path_buf()));
    }
    Ok(())
}

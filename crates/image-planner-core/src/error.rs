use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(
        "File name pattern error in '{file_name}': MUST be '[Seq No.]-[Module.SubModule]-[TaskName].png'"
    )]
    MalformedName { file_name: String },

    #[error("Read '{}' with problem: {reason}", path.display())]
    PriorDataRead { path: PathBuf, reason: String },

    /// Aggregation over zero items. Never reached by the engine; a bug if it is.
    #[error("Statistics requested for empty group: {0}")]
    EmptyGroup(String),

    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Path '{}' MUST be a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("File name is not valid UTF-8: {}", .0.display())]
    NonUtf8FileName(PathBuf),
}

impl Error {
    pub(crate) fn malformed(file_name: &str) -> Self {
        Error::MalformedName {
            file_name: file_name.to_string(),
        }
    }

    pub(crate) fn prior_data(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::PriorDataRead {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

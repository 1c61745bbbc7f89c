pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod plan;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod storage;

pub use crate::config::{AppConfig, PlanPaths};
pub use crate::engine::{PlanEngine, RunResult};
pub use crate::error::Error;
pub use crate::model::{Completion, NodeType, Percentage, PlanItem, ReportItem};
pub use crate::progress::{ProgressReporter, SilentReporter};

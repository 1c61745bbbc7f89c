pub mod report_tree;
pub mod stats;

pub use report_tree::{build_report, build_report_tree, Report};
pub use stats::{aggregate, GroupStats};

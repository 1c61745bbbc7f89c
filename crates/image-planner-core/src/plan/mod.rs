pub mod parser;
pub mod reconcile;

pub use parser::parse_file_name;
pub use reconcile::{reconcile, Reconciliation};

use crate::error::Result;
use crate::model::PlanItem;

/// Parse every listed image name, in order. The first malformed name aborts.
pub fn parse_all(file_names: &[String]) -> Result<Vec<PlanItem>> {
    file_names
        .iter()
        .map(|name| parse_file_name(name))
        .collect()
}

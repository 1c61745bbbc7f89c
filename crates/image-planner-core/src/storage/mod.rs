pub mod atomic;
pub mod plan_csv;

pub use atomic::write_atomically;
pub use plan_csv::{read_prior, write_lost, write_plan, PLAN_COLUMNS};

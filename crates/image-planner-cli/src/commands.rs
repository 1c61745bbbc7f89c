use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "image-planner")]
#[command(
    about = "Turn a directory of screen mockups into a project plan and progress report",
    long_about = None
)]
pub struct Cli {
    /// Data directory holding `images/`, the plan data and the report
    pub data_dir: PathBuf,
}

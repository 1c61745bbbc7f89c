mod commands;
mod logging;
mod progress;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use image_planner_core::{config, PlanEngine};
use progress::CliReporter;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let data_dir = &args.data_dir;
    info!("Start image-planner, with data path = '{}'", data_dir.display());

    let config = config::load_configuration(data_dir).context("Error loading configuration")?;
    let engine = PlanEngine::new(config);
    let result = engine
        .run(data_dir, &CliReporter)
        .with_context(|| format!("Error planning '{}'", data_dir.display()))?;

    println!();
    info!(
        "{} tasks, {} lost, {} points at {} complete in {}",
        format!("{}", result.items).green(),
        format!("{}", result.lost_items).red(),
        format!("{}", result.points).cyan(),
        format!("{}%", result.percentage).cyan(),
        format!("{:.2}s", result.duration.as_secs_f64()).green(),
    );
    info!("SUCCESS: image-planner.");

    Ok(())
}

//! spec-runner entry point.
//!
//! Parses command line arguments, resolves the run configuration and drives
//! a single spec run, mapping the outcome onto the process exit code:
//! 0 for skip/pass (and for failures downgraded with `--ignore-failure`),
//! 1 for a failed run, 2 for configuration errors.

mod config;
mod error;
mod executor;
mod reporter;
mod runtime;
mod utils;

use std::process::ExitCode;

use log::debug;

use crate::config::{CliArgs, RunConfig};
use crate::error::RunnerError;

fn main() -> ExitCode {
    let args = CliArgs::parse_args();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.get_log_level()),
    )
    .init();

    let config = match RunConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::from(2);
        }
    };
    debug!("Run configuration: {config:?}");

    match executor::execute(&config) {
        Ok(outcome) => {
            debug!("Run finished: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            match e.downcast_ref::<RunnerError>() {
                Some(RunnerError::TestsFailed { .. }) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

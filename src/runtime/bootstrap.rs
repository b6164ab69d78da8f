//! Loading of the bootstrap script.
//!
//! The bootstrap script owns all test discovery and report rendering; this
//! module only hands its text to the orchestrator. A copy is embedded in
//! the binary and can be replaced through configuration.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::error::RunnerError;

/// The bootstrap script shipped with the binary. It defines the
/// `run(source_dir, required_modules, report_file, progress_file)` entry
/// point invoked after evaluation.
const EMBEDDED_BOOTSTRAP: &str = include_str!("../../resources/runner.rb");

/// Returns the bootstrap script body, preferring a configured override.
///
/// An override file that cannot be read is a configuration error; the
/// embedded copy itself is always available.
pub fn load_bootstrap(override_path: Option<&Path>) -> Result<String> {
    match override_path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            RunnerError::Configuration(format!(
                "bootstrap script '{}' could not be read: {e}",
                path.display()
            ))
            .into()
        }),
        None => Ok(EMBEDDED_BOOTSTRAP.to_string()),
    }
}

//! Verdict reporting and progress-log echo.
//!
//! The reporter folds the runtime verdict and the progress log it wrote
//! into build output, and decides whether the run fails the build. Reading
//! the progress log is auxiliary: a read error is logged and swallowed and
//! never changes the build result.

use std::path::Path;

use anyhow::Result;
use log::{error, info, warn};

use crate::error::RunnerError;
use crate::executor::{ExecutionResult, RunOutcome};
use crate::utils;

/// Computed locations of the files the script runtime writes.
///
/// Paths are derived, not persisted: `<output>/<name>.html` for the
/// report, `<output>/<name>.txt` for the progress log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    report_file: String,
    progress_file: String,
}

impl ReportArtifacts {
    pub fn new(output_directory: &Path, report_name: &str) -> Self {
        Self {
            report_file: format!("{}/{}.html", output_directory.display(), report_name),
            progress_file: format!("{}/{}.txt", output_directory.display(), report_name),
        }
    }

    pub fn report_file(&self) -> &str {
        &self.report_file
    }

    pub fn progress_file(&self) -> &str {
        &self.progress_file
    }
}

/// Folds an [`ExecutionResult`] into build output.
pub struct Reporter {
    artifacts: ReportArtifacts,
}

impl Reporter {
    pub fn new(artifacts: ReportArtifacts) -> Self {
        Self { artifacts }
    }

    /// Logs the verdict and decides the build result.
    ///
    /// The progress log is echoed at info level on success and warn level
    /// on failure. A failed run raises [`RunnerError::TestsFailed`] unless
    /// failures are configured to be ignored.
    pub fn report(&self, result: &ExecutionResult, ignore_failure: bool) -> Result<RunOutcome> {
        let progress = self.progress_string();
        if result.passed {
            info!(
                "Spec tests successful. See '{}' for full details.",
                self.artifacts.report_file()
            );
            info!("{progress}");
            Ok(RunOutcome::Passed)
        } else {
            let message = format!(
                "Spec tests failed. See '{}' for details.",
                self.artifacts.report_file()
            );
            warn!("{message}");
            warn!("{progress}");
            if ignore_failure {
                Ok(RunOutcome::FailedButIgnored)
            } else {
                Err(RunnerError::TestsFailed { message }.into())
            }
        }
    }

    /// The progress log contents, or an empty string when unreadable.
    fn progress_string(&self) -> String {
        match utils::read_file_as_string(Path::new(self.artifacts.progress_file())) {
            Ok(contents) => contents,
            Err(e) => {
                error!("An error occurred while reading progress file");
                error!("{e}");
                String::new()
            }
        }
    }
}

//! Orchestration of a single spec run.
//!
//! The executor decides whether to run at all, prepares the runtime
//! environment, assembles the script body, invokes the runtime and routes
//! the verdict through the reporter.

use std::time::Instant;

use anyhow::Result;
use log::{debug, info};

use crate::config::RunConfig;
use crate::reporter::{ReportArtifacts, Reporter};
use crate::runtime::{self, EmbeddedRuntime, ScriptRuntime};

/// How a run ended, for callers that made it past the error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Execution was skipped by configuration.
    Skipped,
    /// All specs passed.
    Passed,
    /// Specs failed but the failure is configured to be ignored.
    FailedButIgnored,
}

/// The verdict of one runtime invocation. Produced exactly once per run;
/// never re-derived.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionResult {
    pub passed: bool,
}

/// Runs the configured specs through a fresh script runtime.
///
/// Skip flags are honored before the runtime home is validated or any
/// runtime is constructed; a missing runtime home is a configuration
/// error, not a test failure.
pub fn execute(config: &RunConfig) -> Result<RunOutcome> {
    if config.skip_tests || config.skip {
        info!("Skipping spec tests");
        return Ok(RunOutcome::Skipped);
    }
    let home = config.validate_runtime_home()?;

    let mut runtime = EmbeddedRuntime::new(home, &config.interpreter);
    execute_with(config, &mut runtime)
}

/// Drives the run against an already constructed runtime instance.
///
/// Directories from the classpath are registered on the instance before
/// the assembled script (archive directives first, bootstrap text second)
/// is evaluated.
pub fn execute_with(config: &RunConfig, runtime: &mut dyn ScriptRuntime) -> Result<RunOutcome> {
    let start = Instant::now();

    let directives = runtime::prepare_classpath(runtime, &config.classpath_elements)?;
    let bootstrap = runtime::load_bootstrap(config.bootstrap_script.as_deref())?;
    let script = format!("{directives}{bootstrap}");

    info!(
        "Running spec tests from {}",
        config.source_directory.display()
    );
    runtime.eval(&script)?;

    let artifacts = ReportArtifacts::new(&config.output_directory, &config.report_name);
    let passed = runtime.invoke_run(
        &config.source_directory.to_string_lossy(),
        &config.required_modules,
        artifacts.report_file(),
        artifacts.progress_file(),
    )?;
    debug!("Script runtime finished in {:?}", start.elapsed());

    let reporter = Reporter::new(artifacts);
    reporter.report(&ExecutionResult { passed }, config.ignore_failure)
}

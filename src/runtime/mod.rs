//! The seam between the orchestrator and the external script runtime.
//!
//! All engine-specific detail lives behind the [`ScriptRuntime`] trait: the
//! orchestrator only sees load-path registration, script evaluation and the
//! four-argument `run` entry point returning a boolean verdict.

use std::path::Path;

use anyhow::Result;

#[cfg(test)]
use mockall::automock;

mod bootstrap;
mod embedded;
mod environment;

pub use bootstrap::load_bootstrap;
pub use embedded::EmbeddedRuntime;
pub use environment::prepare_classpath;

/// Adapter for the external script runtime.
///
/// One instance corresponds to one runtime invocation. Instances are
/// created fresh per run and never reused or shared between threads.
#[cfg_attr(test, automock)]
pub trait ScriptRuntime {
    /// Registers a directory with the runtime's resource loader.
    ///
    /// Registration is a side effect on the live instance and takes effect
    /// before any script text is evaluated.
    fn add_load_path(&mut self, dir: &Path) -> Result<()>;

    /// Accepts the assembled script body for evaluation.
    fn eval(&mut self, script: &str) -> Result<()>;

    /// Calls the script-defined `run` entry point and returns its verdict.
    ///
    /// A non-boolean return value from the entry point is a configuration
    /// error, never a silent `false`.
    fn invoke_run(
        &mut self,
        source_dir: &str,
        required_modules: &[String],
        report_file: &str,
        progress_file: &str,
    ) -> Result<bool>;
}

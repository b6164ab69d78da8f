//! Error types shared across the runner.

use thiserror::Error;

/// Errors that terminate a spec run.
///
/// Configuration problems abort the run before any verdict exists and are
/// never retried. A failed run is the expected negative outcome and can be
/// downgraded to a warning with `--ignore-failure`; progress-log read
/// errors are logged and swallowed and never appear here.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Invalid or incomplete configuration: missing runtime home, malformed
    /// classpath entry, unreadable bootstrap script, or a non-boolean
    /// verdict from the entry point.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The run completed and the verdict was negative.
    #[error("{message}")]
    TestsFailed { message: String },
}

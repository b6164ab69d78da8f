use clap::Parser;
use std::path::PathBuf;

// spec-runner - run spec files through an external script runtime
#[derive(Parser, Debug, Default)]
#[clap(
    name = "spec-runner",
    version,
    about = "Run spec files through an external script runtime and report the verdict",
    after_help = "EXIT CODES:\n  0   specs passed, execution skipped, or failure ignored\n  1   specs failed\n  2   configuration error\n\nEXAMPLES:\n  spec-runner --runtime-home /opt/runtime\n  spec-runner --source-dir spec --output-dir target/reports\n  spec-runner --classpath /libs/support.jar --classpath build/classes\n  spec-runner --config spec-runner.toml --ignore-failure"
)]
pub struct CliArgs {
    // Root directory of the spec files handed to the runtime
    #[clap(short = 's', long = "source-dir", help = "Root directory of the spec files")]
    pub source_dir: Option<PathBuf>,

    // Base directory for the generated report and progress files
    #[clap(short = 'o', long = "output-dir", help = "Base directory for generated report files")]
    pub output_dir: Option<PathBuf>,

    // Base file name (without extension) for the report and progress files
    #[clap(long = "report-name", help = "Base file name (without extension) for report files")]
    pub report_name: Option<String>,

    // Home directory of the script runtime; required unless execution is skipped
    #[clap(long = "runtime-home", help = "Home directory of the script runtime")]
    pub runtime_home: Option<PathBuf>,

    // Interpreter executable looked up under <runtime-home>/bin
    #[clap(long = "interpreter", help = "Interpreter executable under <runtime-home>/bin")]
    pub interpreter: Option<String>,

    // Classpath entries, in order: directories go to the runtime loader,
    // .jar archives become require directives in the assembled script
    #[clap(
        long = "classpath",
        help = "Classpath entry: a directory or a .jar archive (repeatable, ordered)"
    )]
    pub classpath: Vec<String>,

    // Module names passed through verbatim to the bootstrap entry point
    #[clap(short = 'r', long = "require", help = "Module required by the bootstrap script (repeatable)")]
    pub require: Vec<String>,

    // Replacement for the embedded bootstrap script
    #[clap(long = "bootstrap-script", help = "Override file for the embedded bootstrap script")]
    pub bootstrap_script: Option<PathBuf>,

    // Skip spec execution entirely
    #[clap(long = "skip-tests", help = "Skip spec execution entirely")]
    pub skip_tests: bool,

    // Alias flag with the same effect as --skip-tests
    #[clap(long = "skip", help = "Skip spec execution entirely")]
    pub skip: bool,

    // Downgrade a failed run from a build failure to a warning
    #[clap(long = "ignore-failure", help = "Report failures as warnings instead of failing the build")]
    pub ignore_failure: bool,

    // Optional TOML configuration file; CLI flags override its values
    #[clap(short = 'c', long = "config", help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    // Verbose mode - show more log information
    #[clap(short = 'v', long = "verbose", help = "Enable verbose logging")]
    pub verbose: bool,

    // Quiet mode - suppress everything below error level
    #[clap(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get log level
    pub fn get_log_level(&self) -> &str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_follows_flags() {
        let mut args = CliArgs::default();
        assert_eq!(args.get_log_level(), "info");

        args.verbose = true;
        assert_eq!(args.get_log_level(), "debug");

        // quiet wins over verbose
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn classpath_entries_keep_their_order() {
        let args = CliArgs::parse_from([
            "spec-runner",
            "--classpath",
            "/libs/a.jar",
            "--classpath",
            "/classes",
            "--classpath",
            "/libs/b.jar",
        ]);
        assert_eq!(args.classpath, ["/libs/a.jar", "/classes", "/libs/b.jar"]);
    }

    #[test]
    fn require_flags_accumulate() {
        let args = CliArgs::parse_from(["spec-runner", "-r", "json", "-r", "net/http"]);
        assert_eq!(args.require, ["json", "net/http"]);
    }
}

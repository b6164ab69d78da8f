//! Subprocess-backed script runtime.
//!
//! The runtime is an interpreter installed under a home directory. The
//! adapter stages the evaluated script body, appends a generated trailer
//! that calls the `run` entry point and prints a verdict marker, then
//! executes `<home>/bin/<interpreter>` synchronously and scans its output
//! for the marker. Registered load paths are passed as `-I` arguments.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use regex::Regex;

use crate::error::RunnerError;
use crate::runtime::ScriptRuntime;

/// Marker printed by the generated trailer; the token after the prefix is
/// the verdict.
const VERDICT_PREFIX: &str = "::verdict::";

/// A fresh interpreter invocation rooted at a runtime home.
pub struct EmbeddedRuntime {
    home: PathBuf,
    interpreter: String,
    load_paths: Vec<PathBuf>,
    script: String,
}

impl EmbeddedRuntime {
    /// Creates a runtime rooted at the given home directory.
    pub fn new(home: PathBuf, interpreter: &str) -> Self {
        info!("Script runtime home: {}", home.display());
        Self {
            home,
            interpreter: interpreter.to_string(),
            load_paths: Vec::new(),
            script: String::new(),
        }
    }

    fn interpreter_path(&self) -> PathBuf {
        self.home.join("bin").join(&self.interpreter)
    }
}

impl ScriptRuntime for EmbeddedRuntime {
    fn add_load_path(&mut self, dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() {
            return Err(RunnerError::Configuration(
                "malformed classpath entry: empty path".to_string(),
            )
            .into());
        }
        debug!("Registered load path: {}", dir.display());
        self.load_paths.push(dir.to_path_buf());
        Ok(())
    }

    fn eval(&mut self, script: &str) -> Result<()> {
        // A child process cannot evaluate incrementally; the body is staged
        // here and executed together with the entry-point call.
        self.script = script.to_string();
        Ok(())
    }

    fn invoke_run(
        &mut self,
        source_dir: &str,
        required_modules: &[String],
        report_file: &str,
        progress_file: &str,
    ) -> Result<bool> {
        let mut script = self.script.clone();
        script.push_str(&trailer(
            source_dir,
            required_modules,
            report_file,
            progress_file,
        ));

        let mut staged = tempfile::Builder::new()
            .prefix("spec_runner_")
            .suffix(".rb")
            .tempfile()
            .context("Failed to stage the runner script")?;
        staged
            .write_all(script.as_bytes())
            .context("Failed to write the staged runner script")?;

        let interpreter = self.interpreter_path();
        let mut command = Command::new(&interpreter);
        for dir in &self.load_paths {
            command.arg("-I").arg(dir);
        }
        command.arg(staged.path());

        debug!("Launching script runtime: {command:?}");
        let output = command.output().with_context(|| {
            format!(
                "Failed to launch script runtime '{}'",
                interpreter.display()
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "script runtime exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        parse_verdict(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Generates the statements that call `run` and report its verdict.
fn trailer(
    source_dir: &str,
    required_modules: &[String],
    report_file: &str,
    progress_file: &str,
) -> String {
    let modules = required_modules
        .iter()
        .map(|module| quote(module))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "__verdict = run({}, [{}], {}, {})\n\
         case __verdict\n\
         when true then STDOUT.write(\"{p}pass\\n\")\n\
         when false then STDOUT.write(\"{p}fail\\n\")\n\
         else STDOUT.write(\"{p}\" + __verdict.class.name + \"\\n\")\n\
         end\n",
        quote(source_dir),
        modules,
        quote(report_file),
        quote(progress_file),
        p = VERDICT_PREFIX,
    )
}

/// Single-quotes a string for the script, escaping quotes and backslashes.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Maps the verdict marker to the entry point's boolean result.
///
/// Any token other than `pass`/`fail` is the name of a non-boolean return
/// type and violates the entry-point contract.
fn parse_verdict(output: &str) -> Result<bool> {
    let marker = Regex::new(&format!(
        "(?m)^{}(\\S+)$",
        regex::escape(VERDICT_PREFIX)
    ))?;
    let token = marker
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
        .ok_or_else(|| {
            RunnerError::Configuration(
                "script runtime produced no verdict for the run entry point".to_string(),
            )
        })?;
    match token {
        "pass" => Ok(true),
        "fail" => Ok(false),
        other => Err(RunnerError::Configuration(format!(
            "run entry point returned a non-boolean result ({other})"
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"back\slash"), r"'back\\slash'");
    }

    #[test]
    fn trailer_passes_all_four_arguments() {
        let modules = vec!["json".to_string(), "net/http".to_string()];
        let text = trailer("spec", &modules, "reports/r.html", "reports/r.txt");
        assert!(text.starts_with(
            "__verdict = run('spec', ['json', 'net/http'], 'reports/r.html', 'reports/r.txt')"
        ));
        assert!(text.contains("::verdict::pass"));
        assert!(text.contains("::verdict::fail"));
    }

    #[test]
    fn parse_verdict_maps_pass_and_fail() {
        assert!(parse_verdict("::verdict::pass\n").unwrap());
        assert!(!parse_verdict("noise\n::verdict::fail\n").unwrap());
    }

    #[test]
    fn parse_verdict_rejects_non_boolean_tokens() {
        let err = parse_verdict("::verdict::NilClass\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::Configuration(_))
        ));
        assert!(err.to_string().contains("NilClass"));
    }

    #[test]
    fn parse_verdict_requires_a_marker() {
        let err = parse_verdict("no marker here\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::Configuration(_))
        ));
    }

    #[test]
    fn empty_load_path_is_rejected() {
        let mut runtime = EmbeddedRuntime::new(PathBuf::from("/opt/runtime"), "ruby");
        let err = runtime.add_load_path(Path::new("")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::Configuration(_))
        ));
    }

    #[test]
    fn interpreter_is_resolved_under_the_home_bin() {
        let runtime = EmbeddedRuntime::new(PathBuf::from("/opt/runtime"), "jruby");
        assert_eq!(
            runtime.interpreter_path(),
            PathBuf::from("/opt/runtime/bin/jruby")
        );
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::tempdir;

        // A runtime home whose interpreter is a shell stub.
        fn stub_home(dir: &Path, body: &str) -> PathBuf {
            let home = dir.join("runtime");
            fs::create_dir_all(home.join("bin")).unwrap();
            let interpreter = home.join("bin/ruby");
            fs::write(&interpreter, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&interpreter, fs::Permissions::from_mode(0o755)).unwrap();
            home
        }

        #[test]
        fn stub_verdicts_round_trip_through_the_process_boundary() {
            let dir = tempdir().unwrap();
            let home = stub_home(dir.path(), "echo '::verdict::pass'");
            let mut runtime = EmbeddedRuntime::new(home, "ruby");
            runtime.eval("def run(a, b, c, d); end").unwrap();
            let passed = runtime.invoke_run("spec", &[], "r.html", "r.txt").unwrap();
            assert!(passed);
        }

        #[test]
        fn non_zero_interpreter_exit_is_an_error() {
            let dir = tempdir().unwrap();
            let home = stub_home(dir.path(), "echo 'boom' >&2\nexit 3");
            let mut runtime = EmbeddedRuntime::new(home, "ruby");
            runtime.eval("").unwrap();
            let err = runtime
                .invoke_run("spec", &[], "r.html", "r.txt")
                .unwrap_err();
            assert!(err.to_string().contains("script runtime exited"));
        }

        #[test]
        fn missing_interpreter_fails_with_launch_context() {
            let dir = tempdir().unwrap();
            let mut runtime = EmbeddedRuntime::new(dir.path().join("nowhere"), "ruby");
            runtime.eval("").unwrap();
            let err = runtime
                .invoke_run("spec", &[], "r.html", "r.txt")
                .unwrap_err();
            assert!(format!("{err:#}").contains("Failed to launch script runtime"));
        }
    }
}

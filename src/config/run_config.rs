//! The immutable configuration for a single spec run.
//!
//! [`RunConfig::load`] merges command line flags over TOML file values over
//! built-in defaults. The runtime home additionally falls back to the
//! `SPEC_RUNTIME_HOME` environment variable; its absence everywhere is a
//! configuration error raised at gate time, never a test failure.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::config::cli_args::CliArgs;
use crate::error::RunnerError;
use crate::utils;

/// Environment variable consulted when no runtime home is configured.
pub const RUNTIME_HOME_ENV: &str = "SPEC_RUNTIME_HOME";

const DEFAULT_SOURCE_DIR: &str = "spec";
const DEFAULT_OUTPUT_DIR: &str = "reports";
const DEFAULT_REPORT_NAME: &str = "spec_report";
const DEFAULT_INTERPRETER: &str = "ruby";

/// Optional values read from a TOML configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub source_directory: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub report_name: Option<String>,
    pub runtime_home: Option<PathBuf>,
    pub interpreter: Option<String>,
    pub classpath_elements: Option<Vec<String>>,
    pub required_modules: Option<Vec<String>>,
    pub bootstrap_script: Option<PathBuf>,
    pub skip_tests: Option<bool>,
    pub skip: Option<bool>,
    pub ignore_failure: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        utils::read_toml_from_file(path)
    }
}

/// Fully resolved settings for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub report_name: String,
    pub runtime_home: Option<PathBuf>,
    pub interpreter: String,
    pub classpath_elements: Vec<String>,
    pub required_modules: Vec<String>,
    pub bootstrap_script: Option<PathBuf>,
    pub skip_tests: bool,
    pub skip: bool,
    pub ignore_failure: bool,
}

impl RunConfig {
    /// Resolves the configuration for this invocation.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    fn merge(args: &CliArgs, file: FileConfig) -> Self {
        Self {
            source_directory: args
                .source_dir
                .clone()
                .or(file.source_directory)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR)),
            output_directory: args
                .output_dir
                .clone()
                .or(file.output_directory)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            report_name: args
                .report_name
                .clone()
                .or(file.report_name)
                .unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string()),
            runtime_home: args.runtime_home.clone().or(file.runtime_home),
            interpreter: args
                .interpreter
                .clone()
                .or(file.interpreter)
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            classpath_elements: if args.classpath.is_empty() {
                file.classpath_elements.unwrap_or_default()
            } else {
                args.classpath.clone()
            },
            required_modules: if args.require.is_empty() {
                file.required_modules.unwrap_or_default()
            } else {
                args.require.clone()
            },
            bootstrap_script: args.bootstrap_script.clone().or(file.bootstrap_script),
            skip_tests: args.skip_tests || file.skip_tests.unwrap_or(false),
            skip: args.skip || file.skip.unwrap_or(false),
            ignore_failure: args.ignore_failure || file.ignore_failure.unwrap_or(false),
        }
    }

    /// The runtime home, falling back to `SPEC_RUNTIME_HOME`.
    ///
    /// An empty value counts as unset.
    pub fn resolved_runtime_home(&self) -> Option<PathBuf> {
        self.runtime_home
            .clone()
            .or_else(|| env::var_os(RUNTIME_HOME_ENV).map(PathBuf::from))
            .filter(|home| !home.as_os_str().is_empty())
    }

    /// Fails when no runtime home is configured anywhere.
    pub fn validate_runtime_home(&self) -> Result<PathBuf> {
        self.resolved_runtime_home().ok_or_else(|| {
            RunnerError::Configuration(format!(
                "runtime home not specified (--runtime-home, runtime_home or ${RUNTIME_HOME_ENV})"
            ))
            .into()
        })
    }
}

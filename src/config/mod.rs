//! Run configuration handling.
//!
//! Configuration comes from three layers: built-in defaults, an optional
//! TOML file and command line flags, with later layers overriding earlier
//! ones. The resolved [`RunConfig`] is built once per process and passed
//! around by shared reference.

pub mod cli_args;
pub mod run_config;

pub use cli_args::CliArgs;
pub use run_config::RunConfig;

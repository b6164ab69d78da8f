//! Shared helpers for configuration and report-file access.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads and deserializes a TOML file into the given type.
pub fn read_toml_from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let value = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(value)
}

/// Reads a whole file into a string.
///
/// The file handle is scoped to this call and released on every exit path,
/// including read errors.
pub fn read_file_as_string(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Debug, serde::Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn reads_toml_into_struct() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "name = \"specs\"\ncount = 3").unwrap();

        let sample: Sample = read_toml_from_file(&path).unwrap();
        assert_eq!(sample.name, "specs");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn toml_error_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result: Result<Sample> = read_toml_from_file(&path);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("missing.toml"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(read_file_as_string(&dir.path().join("absent.txt")).is_err());
    }
}

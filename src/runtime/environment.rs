//! Classpath preparation for the script runtime.

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::runtime::ScriptRuntime;

/// Splits the classpath between the runtime loader and the script text.
///
/// Entries are handled in input order. Directories are registered on the
/// live runtime instance, so they are visible before the bootstrap script
/// runs; `.jar` archives become textual `require` directives executed as
/// part of the assembled script. No entry is handled both ways.
///
/// Returns the directive text, one line per archive.
pub fn prepare_classpath(runtime: &mut dyn ScriptRuntime, elements: &[String]) -> Result<String> {
    let mut directives = String::new();
    for element in elements {
        if element.ends_with(".jar") {
            directives.push_str(&format!("require '{element}'\n"));
        } else {
            info!("Adding to script load path: {element}");
            runtime.add_load_path(Path::new(element))?;
        }
    }
    Ok(directives)
}

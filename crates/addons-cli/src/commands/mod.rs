//! Command implementations.

mod build;
mod list;

pub use build::run_build;
pub use list::run_list;

use std::path::{Path, PathBuf};

use addons_core::{RuntimeVersion, SelectionConfig};

use crate::error::Result;

/// Load the selection configuration and determine the base directory that
/// relative source paths resolve against (the config file's directory).
pub(crate) fn load_config(
    path: &Path,
    runtime_version: Option<&str>,
) -> Result<(SelectionConfig, PathBuf)> {
    let mut config = SelectionConfig::load(path)?;
    if let Some(version) = runtime_version {
        // Validate the override before trusting it later.
        version.parse::<RuntimeVersion>()?;
        config.runtime_version = Some(version.to_string());
    }
    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((config, base))
}

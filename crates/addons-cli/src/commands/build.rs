//! The `addons build` reconciliation command.

use std::path::{Path, PathBuf};

use addons_build::MergedDirectoryBuilder;
use addons_core::build_namespace;

use crate::error::{Error, Result};

/// Resolve the namespace and reconcile the target directory against it.
pub fn run_build(
    config_path: &Path,
    runtime_version: Option<&str>,
    target: Option<&Path>,
) -> Result<()> {
    let (config, base) = super::load_config(config_path, runtime_version)?;
    let namespace = build_namespace(&config, &base)?;

    let target: PathBuf = match target {
        Some(path) => path.to_path_buf(),
        None => {
            let configured = config.target.as_deref().ok_or(Error::NoTarget)?;
            if configured.is_absolute() {
                configured.to_path_buf()
            } else {
                base.join(configured)
            }
        }
    };

    let builder = MergedDirectoryBuilder::new(target);
    let report = builder.reconcile(&namespace)?;

    for name in &report.linked {
        println!("linked {name}");
    }
    for name in &report.removed {
        println!("removed {name}");
    }
    for error in &report.errors {
        eprintln!("error: {error}");
    }
    println!(
        "{} linked, {} removed, {} kept",
        report.linked.len(),
        report.removed.len(),
        report.kept.len()
    );

    report.ensure_complete()?;
    Ok(())
}

//! Reconciliation of a target directory against the merged namespace.
//!
//! The target ends up holding one symlink per resolved addon name, pointing
//! at the winning source path. Links are references, never copies: edits in
//! the source stay visible and large trees are not duplicated. The
//! reconciliation is idempotent and safe to re-run against a non-empty
//! target; it never requires the target to start clean.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use addons_core::MergedNamespace;

use crate::error::{Error, Result};

/// Lock file guarding the target against concurrent rebuilds.
pub const LOCK_FILENAME: &str = ".addons.lock";

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Names newly linked into the target.
    pub linked: Vec<String>,
    /// Stale or retargeted links removed.
    pub removed: Vec<String>,
    /// Links already correct and left untouched.
    pub kept: Vec<String>,
    /// Per-entry failures; reconciliation of other entries continued.
    pub errors: Vec<String>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn a partially failed run into an error, per the all-or-nothing
    /// reporting contract: individual entries may fail without stopping the
    /// others, but the build step as a whole must report failure.
    pub fn ensure_complete(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Incomplete(self.errors.len()))
        }
    }
}

/// Materializes the merged namespace into a flat directory of symlinks.
pub struct MergedDirectoryBuilder {
    target: PathBuf,
}

impl MergedDirectoryBuilder {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Reconcile the target directory against the namespace.
    ///
    /// Holds an exclusive lock for the whole run: rebuilds of the same
    /// target are a single critical section, never interleaved.
    pub fn reconcile(&self, namespace: &MergedNamespace) -> Result<BuildReport> {
        fs::create_dir_all(&self.target)?;

        let lock_path = self.target.join(LOCK_FILENAME);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| Error::Lock {
                path: lock_path.clone(),
                source,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|source| Error::Lock {
                path: lock_path,
                source,
            })?;

        let report = self.reconcile_locked(namespace);
        // Lock released when lock_file drops.
        report
    }

    fn reconcile_locked(&self, namespace: &MergedNamespace) -> Result<BuildReport> {
        let mut report = BuildReport::default();
        let mut present = BTreeSet::new();

        for entry in fs::read_dir(&self.target)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == LOCK_FILENAME {
                continue;
            }
            let path = entry.path();
            let meta = fs::symlink_metadata(&path)?;
            if !meta.file_type().is_symlink() {
                tracing::warn!(entry = %name, "unmanaged entry in target, leaving in place");
                present.insert(name);
                continue;
            }

            let wanted = namespace.get(&name).map(|e| e.path.clone());
            let current = fs::read_link(&path)?;
            match wanted {
                Some(dest) if current == dest => {
                    present.insert(name.clone());
                    report.kept.push(name);
                }
                _ => {
                    // Stale, dangling or pointing at a shadowed source.
                    match fs::remove_file(&path) {
                        Ok(()) => {
                            tracing::debug!(addon = %name, "removed stale link");
                            report.removed.push(name);
                        }
                        Err(e) => {
                            report.errors.push(format!("failed to remove {name}: {e}"));
                            present.insert(name);
                        }
                    }
                }
            }
        }

        for entry in namespace.entries() {
            if present.contains(&entry.name) {
                continue;
            }
            let link = self.target.join(&entry.name);
            match symlink(&entry.path, &link) {
                Ok(()) => {
                    tracing::debug!(addon = %entry.name, dest = %entry.path.display(), "linked");
                    report.linked.push(entry.name.clone());
                }
                Err(e) => {
                    report
                        .errors
                        .push(format!("failed to link {name}: {e}", name = entry.name));
                }
            }
        }

        // Directory iteration order is platform-dependent; reports are not.
        report.kept.sort();
        report.removed.sort();
        report.errors.sort();
        Ok(report)
    }
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(original, link)
}

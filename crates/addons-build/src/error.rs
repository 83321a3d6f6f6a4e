use std::path::PathBuf;

/// Errors that can occur while materializing the merged namespace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to resolve the addon namespace.
    #[error(transparent)]
    Core(#[from] addons_core::Error),

    /// Could not acquire the per-target reconciliation lock.
    #[error("failed to lock target directory {path}: {source}")]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error touching the target directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more entries failed to reconcile.
    #[error("reconciliation finished with {0} error(s)")]
    Incomplete(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

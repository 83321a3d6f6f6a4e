use std::path::PathBuf;

/// Errors that can occur while resolving or querying addons.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A present manifest file could not be parsed.
    #[error("failed to parse addon manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    /// The selection configuration file could not be parsed.
    #[error("failed to parse selection config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// The selection configuration is structurally invalid.
    #[error("invalid selection config: {reason}")]
    ConfigInvalid { reason: String },

    /// The target runtime version string is not understood.
    #[error("invalid runtime version '{0}'")]
    InvalidRuntimeVersion(String),

    /// The same addon name was both requested and excluded.
    #[error("addon(s) both requested and excluded: {}", names.join(", "))]
    ConflictingSelection { names: Vec<String> },

    /// Strict mode referenced addon names absent from the merged namespace.
    #[error("unknown addon(s): {}", names.join(", "))]
    MissingAddon { names: Vec<String> },

    /// The combination of query flags is not meaningful.
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// I/O error while scanning addon sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] addons_core::Error),

    #[error(transparent)]
    Build(#[from] addons_build::Error),

    /// No target directory configured or supplied for `build`.
    #[error("no target directory: pass --target or set `target` in the configuration")]
    NoTarget,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

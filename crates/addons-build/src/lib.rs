//! Materialization of the merged addon namespace.
//!
//! Consumes the in-memory namespace produced by `addons-core` and reconciles
//! a target directory of symlinks against it: missing names are linked in,
//! stale entries are removed, correct links are left untouched.

pub mod builder;
pub mod error;

pub use builder::{BuildReport, LOCK_FILENAME, MergedDirectoryBuilder};
pub use error::{Error, Result};

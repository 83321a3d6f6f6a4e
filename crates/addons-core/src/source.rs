//! Addon source enumeration and priority ranking.
//!
//! Sources contribute addon candidates in a fixed, total priority order:
//! the private source beats every repository, repositories (in declared
//! order) beat the core source, and the enterprise source ranks last.
//! Enterprise is also a separate reporting category: an addon resolved from
//! it is never counted as private, extra or core.

use std::path::{Path, PathBuf};

use crate::config::SelectionConfig;

/// The category a source (and the addons won from it) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    Private,
    Repository,
    Core,
    Enterprise,
}

impl SourceKind {
    /// Human-readable category label used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Private => "private",
            SourceKind::Repository => "repository",
            SourceKind::Core => "core",
            SourceKind::Enterprise => "enterprise",
        }
    }
}

/// One configured addon source root.
#[derive(Debug, Clone)]
pub struct AddonSource {
    /// Unique source identifier (`private`, `core`, `enterprise` or the
    /// repository id).
    pub id: String,
    pub kind: SourceKind,
    /// Absolute source root directory.
    pub root: PathBuf,
    /// Priority rank; lower wins.
    pub rank: usize,
    /// Addon names admitted from this source (`"*"` admits all).
    pub include: Vec<String>,
}

/// The ranked list of configured sources.
///
/// Construction walks the configuration once; adding a new source kind is a
/// one-line change here rather than a scattering of conditionals.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<AddonSource>,
}

impl SourceRegistry {
    /// Build the registry from a selection configuration. Relative source
    /// paths are resolved against `base`.
    pub fn from_config(config: &SelectionConfig, base: &Path) -> Self {
        let mut sources = Vec::new();
        if let Some(entry) = &config.private {
            sources.push(make_source("private", SourceKind::Private, entry.path.as_path(), &entry.include, base, sources.len()));
        }
        for repo in &config.repositories {
            sources.push(make_source(&repo.id, SourceKind::Repository, repo.path.as_path(), &repo.include, base, sources.len()));
        }
        if let Some(entry) = &config.core {
            sources.push(make_source("core", SourceKind::Core, entry.path.as_path(), &entry.include, base, sources.len()));
        }
        if let Some(entry) = &config.enterprise {
            sources.push(make_source("enterprise", SourceKind::Enterprise, entry.path.as_path(), &entry.include, base, sources.len()));
        }
        Self { sources }
    }

    /// Sources in priority order (highest priority first).
    pub fn iter(&self) -> impl Iterator<Item = &AddonSource> {
        self.sources.iter()
    }

    /// Look up a source by id.
    pub fn get(&self, id: &str) -> Option<&AddonSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn make_source(
    id: &str,
    kind: SourceKind,
    path: &Path,
    include: &[String],
    base: &Path,
    rank: usize,
) -> AddonSource {
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    AddonSource {
        id: id.to_string(),
        kind,
        root,
        rank,
        include: include.to_vec(),
    }
}

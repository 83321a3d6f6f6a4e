//! Candidate scanning, priority resolution and the merged namespace.
//!
//! Scanning lists the immediate subdirectories of every source root and
//! parses their manifests (fanned out across one worker per source; results
//! are joined before any winner is decided). Resolution then picks exactly
//! one winner per addon name by source priority and records the shadowed
//! losers for diagnostics.
//!
//! The merged namespace is a plain in-memory map from addon name to a small
//! record, so the dependency graph and the selection engine never touch the
//! filesystem themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::thread;

use crate::config::{SelectionConfig, WILDCARD};
use crate::error::Result;
use crate::manifest::{AddonManifest, ManifestFormat};
use crate::source::{AddonSource, SourceKind, SourceRegistry};

/// One addon directory found under a source root, before resolution.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub source_id: String,
    pub category: SourceKind,
    pub rank: usize,
    pub path: PathBuf,
    pub manifest: AddonManifest,
    pub has_migrations: bool,
}

/// The winning record for one addon name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub name: String,
    /// Resolved source path the merged directory links to.
    pub path: PathBuf,
    pub source_id: String,
    pub category: SourceKind,
    pub depends: BTreeSet<String>,
    /// Set from the selection configuration, never from the manifest.
    pub disabled: bool,
    /// Whether the addon ships a `migrations/` subdirectory.
    pub has_migrations: bool,
}

/// A candidate hidden by a higher-priority source of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedAddon {
    pub name: String,
    pub source_id: String,
    pub winner_source_id: String,
}

/// Flat, de-duplicated view of addons after priority resolution.
///
/// Invariant: every name maps to exactly one source. Shadowed addons are
/// invisible to the graph and to selection even though their files remain on
/// disk.
#[derive(Debug, Clone, Default)]
pub struct MergedNamespace {
    entries: BTreeMap<String, NamespaceEntry>,
    shadowed: Vec<ShadowedAddon>,
    declared: Vec<(SourceKind, String)>,
}

impl MergedNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a winning entry, replacing any previous entry of the same name.
    pub fn insert(&mut self, entry: NamespaceEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Record an addon name explicitly requested from a source's include
    /// list. Strict mode checks these resolve; the negate hook treats them
    /// as the directly-requested set.
    pub fn declare(&mut self, kind: SourceKind, name: impl Into<String>) {
        self.declared.push((kind, name.into()));
    }

    pub fn record_shadow(&mut self, shadow: ShadowedAddon) {
        self.shadowed.push(shadow);
    }

    pub fn get(&self, name: &str) -> Option<&NamespaceEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn shadowed(&self) -> &[ShadowedAddon] {
        &self.shadowed
    }

    /// Explicitly requested `(source kind, addon name)` pairs.
    pub fn declared(&self) -> &[(SourceKind, String)] {
        &self.declared
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan every registered source for addon candidates.
///
/// Manifest parsing is independent per source, so each source root gets its
/// own worker; the complete candidate set is joined before resolution.
pub fn scan_sources(registry: &SourceRegistry, format: ManifestFormat) -> Result<Vec<Candidate>> {
    thread::scope(|scope| {
        let handles: Vec<_> = registry
            .iter()
            .map(|source| scope.spawn(move || scan_source(source, format)))
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(found) => all.extend(found?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(all)
    })
}

fn scan_source(source: &AddonSource, format: ManifestFormat) -> Result<Vec<Candidate>> {
    let mut found = Vec::new();
    if !source.root.is_dir() {
        tracing::debug!(source = %source.id, root = %source.root.display(), "source root missing, skipping");
        return Ok(found);
    }
    let wildcard = source.include.iter().any(|n| n == WILDCARD);
    for entry in std::fs::read_dir(&source.root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !wildcard && !source.include.iter().any(|n| n == &name) {
            continue;
        }
        let Some(manifest) = AddonManifest::load(&path, format)? else {
            continue;
        };
        if !manifest.installable {
            tracing::debug!(addon = %name, source = %source.id, "addon not installable, skipping");
            continue;
        }
        let has_migrations = path.join("migrations").is_dir();
        found.push(Candidate {
            name,
            source_id: source.id.clone(),
            category: source.kind,
            rank: source.rank,
            path,
            manifest,
            has_migrations,
        });
    }
    Ok(found)
}

/// Pick exactly one winner per addon name by source priority.
pub fn resolve(
    candidates: Vec<Candidate>,
    registry: &SourceRegistry,
    config: &SelectionConfig,
) -> MergedNamespace {
    let mut namespace = MergedNamespace::new();

    let mut ordered = candidates;
    ordered.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.name.cmp(&b.name)));

    for candidate in ordered {
        if let Some(winner_id) = namespace.get(&candidate.name).map(|e| e.source_id.clone()) {
            tracing::debug!(
                addon = %candidate.name,
                source = %candidate.source_id,
                winner = %winner_id,
                "addon shadowed by higher-priority source"
            );
            namespace.record_shadow(ShadowedAddon {
                name: candidate.name,
                source_id: candidate.source_id,
                winner_source_id: winner_id,
            });
            continue;
        }
        let disabled = config.is_disabled(&candidate.name);
        namespace.insert(NamespaceEntry {
            name: candidate.name,
            path: candidate.path,
            source_id: candidate.source_id,
            category: candidate.category,
            depends: candidate.manifest.depends.into_iter().collect(),
            disabled,
            has_migrations: candidate.has_migrations,
        });
    }

    for source in registry.iter() {
        for name in &source.include {
            if name != WILDCARD {
                namespace.declare(source.kind, name.clone());
            }
        }
    }

    namespace
}

/// Run the full build pipeline: registry, scan, priority resolution.
///
/// Relative source paths are resolved against `base` (normally the directory
/// holding the configuration file).
pub fn build_namespace(config: &SelectionConfig, base: &std::path::Path) -> Result<MergedNamespace> {
    let registry = SourceRegistry::from_config(config, base);
    let format = config.runtime_version()?.manifest_format();
    let candidates = scan_sources(&registry, format)?;
    Ok(resolve(candidates, &registry, config))
}

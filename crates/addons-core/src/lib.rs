//! Addon namespace synthesis and dependency-aware selection.
//!
//! This crate implements the model behind the `addons` command of the
//! application-server base image: it enumerates addon source roots in a
//! fixed priority order, parses per-addon manifests, resolves name clashes
//! by source priority into a merged namespace, builds a dependency graph
//! over the winners, and evaluates set-algebra queries against it.
//!
//! Data flows strictly forward (registry, loader, resolver, graph, engine,
//! formatter); no stage mutates state owned by an earlier one. Materializing
//! the namespace on disk lives in the companion `addons-build` crate.

pub mod config;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod output;
pub mod resolve;
pub mod select;
pub mod source;

pub use config::{CONFIG_FILENAME, RepositoryEntry, SelectionConfig, SourceEntry};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use manifest::{
    AddonManifest, LEGACY_MANIFEST_FILENAME, MANIFEST_FILENAME, ManifestFormat, RuntimeVersion,
};
pub use output::{DEFAULT_SEPARATOR, ResultSet};
pub use resolve::{MergedNamespace, NamespaceEntry, ShadowedAddon, build_namespace};
pub use select::{SelectionEngine, SelectionQuery};
pub use source::{AddonSource, SourceKind, SourceRegistry};

//! Query evaluation over the merged namespace.
//!
//! A [`SelectionQuery`] combines origin-category filters, closure seeds,
//! exclusions and policy flags; the engine evaluates it against a freshly
//! built dependency graph and produces a [`ResultSet`].

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::output::{DEFAULT_SEPARATOR, ResultSet};
use crate::resolve::MergedNamespace;
use crate::source::SourceKind;

/// Immutable parsed query configuration.
#[derive(Debug, Clone)]
pub struct SelectionQuery {
    /// Origin-category filters; empty means no filter.
    pub categories: BTreeSet<SourceKind>,
    /// Replace the direct listing with the dependency closure of the seeds.
    pub closure: bool,
    /// Explicit closure roots (accumulated from repeated options).
    pub seeds: Vec<String>,
    /// Names removed from the final result by plain set subtraction.
    pub exclude: Vec<String>,
    /// Fail on explicitly referenced names missing from the namespace.
    pub strict: bool,
    /// Drop addons flagged disabled by the selection configuration.
    pub installable_only: bool,
    /// Keep only addons reached indirectly, never directly requested.
    pub negate: bool,
    /// Output join separator.
    pub separator: String,
}

impl Default for SelectionQuery {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            closure: false,
            seeds: Vec::new(),
            exclude: Vec::new(),
            strict: false,
            installable_only: false,
            negate: false,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Evaluates queries against one merged namespace.
///
/// Construction builds a fresh dependency graph, so every invocation sees
/// the namespace as it is now, never a cached graph.
pub struct SelectionEngine<'a> {
    namespace: &'a MergedNamespace,
    graph: DependencyGraph,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(namespace: &'a MergedNamespace) -> Self {
        Self {
            namespace,
            graph: DependencyGraph::from_namespace(namespace),
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Evaluate a query, producing the deduplicated result set.
    pub fn evaluate(&self, query: &SelectionQuery) -> Result<ResultSet> {
        // Requesting and excluding the same name is ambiguous intent,
        // reported before any traversal and independent of strict mode.
        let conflicts: BTreeSet<&String> = query
            .seeds
            .iter()
            .filter(|name| query.exclude.contains(name))
            .collect();
        if !conflicts.is_empty() {
            return Err(Error::ConflictingSelection {
                names: conflicts.into_iter().cloned().collect(),
            });
        }

        if query.negate && (!query.closure || !query.seeds.is_empty()) {
            return Err(Error::InvalidQuery {
                reason: "negate requires dependency closure without explicit seeds".to_string(),
            });
        }

        if query.strict {
            self.check_referenced_names(query)?;
        }

        let candidates = self.candidate_set(query);

        let mut result: BTreeSet<String> = if query.closure {
            let seed_set: BTreeSet<String> = if !query.seeds.is_empty() {
                query.seeds.iter().cloned().collect()
            } else if query.negate {
                self.declared_names(query)
                    .into_iter()
                    .filter(|name| self.namespace.contains(name))
                    .collect()
            } else {
                candidates
            };
            let mut closed = self.graph.closure(&seed_set);
            if query.negate {
                for name in self.declared_names(query) {
                    closed.remove(&name);
                }
            }
            closed
        } else {
            // Unknown seed names pass through verbatim when not strict.
            let mut direct = candidates;
            direct.extend(query.seeds.iter().cloned());
            direct
        };

        for name in &query.exclude {
            result.remove(name);
        }

        if query.installable_only {
            result.retain(|name| {
                self.namespace
                    .get(name)
                    .is_none_or(|entry| !entry.disabled)
            });
        }

        Ok(result.into_iter().collect())
    }

    /// Union of category-filtered entries. Enterprise addons appear only
    /// when their category is requested; with no filter at all, every
    /// non-enterprise entry is a candidate unless explicit seeds narrow the
    /// query down to themselves.
    fn candidate_set(&self, query: &SelectionQuery) -> BTreeSet<String> {
        if query.categories.is_empty() {
            if !query.seeds.is_empty() {
                return BTreeSet::new();
            }
            return self
                .namespace
                .entries()
                .filter(|e| e.category != SourceKind::Enterprise)
                .map(|e| e.name.clone())
                .collect();
        }
        self.namespace
            .entries()
            .filter(|e| query.categories.contains(&e.category))
            .map(|e| e.name.clone())
            .collect()
    }

    /// Literal include names for the sources matching the category filter
    /// (all sources when no filter is given).
    fn declared_names(&self, query: &SelectionQuery) -> BTreeSet<String> {
        self.namespace
            .declared()
            .iter()
            .filter(|(kind, _)| query.categories.is_empty() || query.categories.contains(kind))
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn check_referenced_names(&self, query: &SelectionQuery) -> Result<()> {
        let mut missing: BTreeSet<String> = query
            .seeds
            .iter()
            .filter(|name| !self.namespace.contains(name))
            .cloned()
            .collect();
        for name in self.declared_names(query) {
            if !self.namespace.contains(&name) {
                missing.insert(name);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingAddon {
                names: missing.into_iter().collect(),
            })
        }
    }
}

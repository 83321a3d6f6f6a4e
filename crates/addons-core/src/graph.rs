//! Dependency graph over the merged namespace.
//!
//! The graph is rebuilt from the current namespace at the start of every
//! query; it is cheap and must never serve stale build state. Edges follow
//! declared dependency names. A dependency name with no node in the
//! namespace is recorded as an unresolved edge: tolerated by default,
//! escalated only when strict mode references the name explicitly.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::resolve::MergedNamespace;
use crate::source::SourceKind;

/// One addon node.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub name: String,
    pub category: SourceKind,
    pub depends: BTreeSet<String>,
    pub disabled: bool,
}

/// Directed graph with edge `A -> B` iff `B` is in `A.depends`.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, GraphNode>,
    /// Missing dependency name -> addons that declared it.
    unresolved: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Build the graph strictly from the merged namespace's manifests.
    pub fn from_namespace(namespace: &MergedNamespace) -> Self {
        let mut graph = Self::default();
        for entry in namespace.entries() {
            graph.nodes.insert(
                entry.name.clone(),
                GraphNode {
                    name: entry.name.clone(),
                    category: entry.category,
                    depends: entry.depends.clone(),
                    disabled: entry.disabled,
                },
            );
        }
        for entry in namespace.entries() {
            for dep in &entry.depends {
                if !graph.nodes.contains_key(dep) {
                    graph
                        .unresolved
                        .entry(dep.clone())
                        .or_default()
                        .insert(entry.name.clone());
                }
            }
        }
        for (dep, dependents) in &graph.unresolved {
            tracing::warn!(
                dependency = %dep,
                dependents = ?dependents,
                "declared dependency has no addon in the merged namespace"
            );
        }
        graph
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.get(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Unresolved dependency names mapped to the addons declaring them.
    pub fn unresolved(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.unresolved
    }

    /// Transitive dependency closure of `seeds`, excluding the seeds
    /// themselves: only addons reached strictly via traversal are returned.
    ///
    /// Iterative worklist with an explicit visited set, so cycles terminate
    /// and recursion depth never tracks graph depth. Seed names without a
    /// node, and unresolved dependency names, are skipped silently.
    pub fn closure(&self, seeds: &BTreeSet<String>) -> BTreeSet<String> {
        let mut visited: BTreeSet<String> = seeds.clone();
        let mut result = BTreeSet::new();
        let mut queue: VecDeque<&str> = seeds.iter().map(String::as_str).collect();

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for dep in &node.depends {
                if visited.insert(dep.clone()) && self.nodes.contains_key(dep) {
                    result.insert(dep.clone());
                    queue.push_back(dep);
                }
            }
        }
        result
    }

    /// Names involved in at least one dependency cycle.
    ///
    /// Kahn-style peeling over resolved edges: repeatedly discard nodes
    /// whose remaining dependencies are all gone; whatever survives sits on
    /// a cycle. This is a diagnostic, never a hard failure.
    pub fn cycle_participants(&self) -> Vec<String> {
        let mut remaining: BTreeMap<&str, BTreeSet<&str>> = self
            .nodes
            .iter()
            .map(|(name, node)| {
                let deps: BTreeSet<&str> = node
                    .depends
                    .iter()
                    .filter(|d| self.nodes.contains_key(d.as_str()))
                    .map(String::as_str)
                    .collect();
                (name.as_str(), deps)
            })
            .collect();

        loop {
            let ready: Vec<&str> = remaining
                .iter()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(name, _)| *name)
                .collect();
            if ready.is_empty() {
                break;
            }
            for name in &ready {
                remaining.remove(name);
            }
            for deps in remaining.values_mut() {
                for name in &ready {
                    deps.remove(name);
                }
            }
        }

        remaining.keys().map(|n| n.to_string()).collect()
    }
}

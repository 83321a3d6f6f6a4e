//! Deterministic rendering of query results.

use std::collections::BTreeSet;

/// Default join separator for rendered result sets.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Deduplicated set of addon names, rendered in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    names: BTreeSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Join the sorted names with `separator`. An empty set renders as an
    /// empty string, not an error.
    pub fn render(&self, separator: &str) -> String {
        self.names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<String> for ResultSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

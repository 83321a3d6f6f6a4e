//! The `addons list` query command.

use std::path::Path;

use addons_core::{SelectionEngine, SelectionQuery, SourceKind, build_namespace};

use crate::cli::ListArgs;
use crate::error::Result;

/// Evaluate a selection query and print the formatted result set.
///
/// The dependency graph is rebuilt from the current on-disk state on every
/// invocation; nothing is cached between runs.
pub fn run_list(config_path: &Path, runtime_version: Option<&str>, args: &ListArgs) -> Result<()> {
    let (config, base) = super::load_config(config_path, runtime_version)?;
    let namespace = build_namespace(&config, &base)?;
    let engine = SelectionEngine::new(&namespace);

    let cycles = engine.graph().cycle_participants();
    if !cycles.is_empty() {
        tracing::warn!(participants = ?cycles, "dependency cycle in merged namespace");
    }

    let query = to_query(args);
    let result = engine.evaluate(&query)?;
    println!("{}", result.render(&query.separator));
    Ok(())
}

fn to_query(args: &ListArgs) -> SelectionQuery {
    let mut query = SelectionQuery::default();
    if args.private {
        query.categories.insert(SourceKind::Private);
    }
    if args.extra {
        query.categories.insert(SourceKind::Repository);
    }
    if args.core {
        query.categories.insert(SourceKind::Core);
    }
    if args.enterprise {
        query.categories.insert(SourceKind::Enterprise);
    }
    query.closure = args.dependencies;
    query.seeds = args.with_addon.clone();
    query.exclude = args.without.clone();
    query.strict = args.strict;
    query.installable_only = args.installable;
    query.negate = args.negate;
    query.separator = args.separator.clone();
    query
}

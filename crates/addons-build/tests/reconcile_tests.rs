//! Reconciliation behavior against real directories.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use addons_build::{LOCK_FILENAME, MergedDirectoryBuilder};
use addons_core::{MANIFEST_FILENAME, MergedNamespace, SelectionConfig, build_namespace};

fn write_addon(root: &Path, source: &str, name: &str) {
    let dir = root.join(source).join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(MANIFEST_FILENAME), "depends = []\n").unwrap();
}

fn namespace(root: &Path, yaml: &str) -> MergedNamespace {
    let config = SelectionConfig::from_yaml(yaml).unwrap();
    build_namespace(&config, root).unwrap()
}

const TWO_SOURCES: &str = r#"
private: { path: private }
core: { path: core }
"#;

#[test]
fn links_every_resolved_addon() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "private_addon");
    write_addon(root, "core", "base");

    let ns = namespace(root, TWO_SOURCES);
    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    let report = builder.reconcile(&ns).unwrap();

    assert_eq!(report.linked, vec!["base", "private_addon"]);
    assert!(report.is_success());
    let link = root.join("auto/addons/private_addon");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), root.join("private/private_addon"));
}

#[test]
fn second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "a");
    write_addon(root, "core", "b");

    let ns = namespace(root, TWO_SOURCES);
    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    builder.reconcile(&ns).unwrap();

    let report = builder.reconcile(&ns).unwrap();
    assert!(report.linked.is_empty());
    assert!(report.removed.is_empty());
    assert_eq!(report.kept, vec!["a", "b"]);
}

#[test]
fn removed_addon_link_is_cleaned_up() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "keeper");
    write_addon(root, "private", "goner");

    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();
    assert!(root.join("auto/addons/goner").symlink_metadata().is_ok());

    // Source disappears; the next run must drop the now-dangling link.
    fs::remove_dir_all(root.join("private/goner")).unwrap();
    let report = builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();
    assert_eq!(report.removed, vec!["goner"]);
    assert_eq!(report.kept, vec!["keeper"]);
    assert!(root.join("auto/addons/goner").symlink_metadata().is_err());
}

#[test]
fn shadow_flip_retargets_link() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "core", "product");

    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    builder.reconcile(&namespace(root, TWO_SOURCES)).unwrap();
    let link = root.join("auto/addons/product");
    assert_eq!(fs::read_link(&link).unwrap(), root.join("core/product"));

    // A private copy appears and wins; the link must follow the winner.
    write_addon(root, "private", "product");
    let report = builder.reconcile(&namespace(root, TWO_SOURCES)).unwrap();
    assert_eq!(report.removed, vec!["product"]);
    assert_eq!(report.linked, vec!["product"]);
    assert_eq!(fs::read_link(&link).unwrap(), root.join("private/product"));
}

#[test]
fn unmanaged_entries_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "a");

    let target = root.join("auto/addons");
    fs::create_dir_all(target.join("handmade")).unwrap();
    fs::write(target.join("notes.txt"), "keep me").unwrap();

    let builder = MergedDirectoryBuilder::new(&target);
    let report = builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();
    assert!(report.is_success());
    assert!(target.join("handmade").is_dir());
    assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn lock_file_is_not_treated_as_an_addon() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "a");

    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();
    let report = builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();
    assert!(!report.kept.iter().any(|n| n == LOCK_FILENAME));
    assert!(!report.removed.iter().any(|n| n == LOCK_FILENAME));
}

#[test]
fn empty_namespace_clears_previous_links() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_addon(root, "private", "a");

    let builder = MergedDirectoryBuilder::new(root.join("auto/addons"));
    builder
        .reconcile(&namespace(root, "private: { path: private }"))
        .unwrap();

    let report = builder.reconcile(&MergedNamespace::new()).unwrap();
    assert_eq!(report.removed, vec!["a"]);
    assert!(report.kept.is_empty());
}

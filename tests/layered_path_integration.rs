//! Integration tests for layered module path resolution.
//!
//! These tests build real directory trees in temporary directories and
//! resolve them through the filesystem reader.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use modpath::layers::{self, LayerError, LayeredPathResolver, LayoutConfig};

/// Create directories below `root`.
fn dirs(root: &Path, rels: &[&str]) {
    for rel in rels {
        fs::create_dir_all(root.join(rel)).unwrap();
    }
}

/// Write a file below `root`, creating parents.
fn file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn p(root: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rel)
    }
}

#[test]
fn configured_layers_follow_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    file(root, "layers.conf", "layers=top,base\n");
    dirs(root, &["layers/top", "layers/base"]);

    let path = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap();

    assert_eq!(
        path,
        vec![p(root, ""), p(root, "layers/top"), p(root, "layers/base")]
    );
}

#[test]
fn missing_configured_layer_fails_whole_call() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("good");
    let bad = temp.path().join("bad");
    dirs(&good, &["layers/base"]);
    file(&bad, "layers.conf", "layers=top,base\n");
    dirs(&bad, &["layers/base"]);

    let err = layers::resolve_layered_module_path(&[good, bad.clone()]).unwrap_err();

    match err {
        LayerError::MissingLayer { root, name, .. } => {
            assert_eq!(root, bad);
            assert_eq!(name, "top");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plain_root_is_returned_alone() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(root, &["org/acme/main", "add-ons/ignored"]);

    let path = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap();

    assert_eq!(path, vec![root.to_path_buf()]);
}

#[test]
fn discovered_layers_put_base_last() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(root, &["layers/base", "layers/zeta", "layers/alpha"]);

    let path = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap();

    assert_eq!(
        path,
        vec![
            p(root, ""),
            p(root, "layers/alpha"),
            p(root, "layers/zeta"),
            p(root, "layers/base"),
        ]
    );
}

#[test]
fn overlays_precede_their_layer_in_listed_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    file(root, "layers.conf", "# order\nlayers = top, base\n");
    dirs(
        root,
        &[
            "layers/top/.overlays/patch-2",
            "layers/top/.overlays/patch-1",
            "layers/base",
        ],
    );
    file(
        root,
        "layers/top/.overlays/.overlays",
        "patch-2\n\n# older\npatch-1\n",
    );

    let path = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap();

    assert_eq!(
        path,
        vec![
            p(root, ""),
            p(root, "layers/top/.overlays/patch-2"),
            p(root, "layers/top/.overlays/patch-1"),
            p(root, "layers/top"),
            p(root, "layers/base"),
        ]
    );
}

#[test]
fn overlay_listed_but_missing_is_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(root, &["layers/base/.overlays"]);
    file(root, "layers/base/.overlays/.overlays", "gone\n");

    let err = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap_err();

    assert!(matches!(err, LayerError::MissingOverlay { path } if path.ends_with("gone")));
}

#[test]
fn add_ons_follow_layers_with_overlays() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(
        root,
        &[
            "layers/base",
            "add-ons/beta",
            "add-ons/alpha/.overlays/fix",
        ],
    );
    file(root, "add-ons/alpha/.overlays/.overlays", "fix\n");

    let path = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap();

    assert_eq!(
        path,
        vec![
            p(root, ""),
            p(root, "layers/base"),
            p(root, "add-ons/alpha/.overlays/fix"),
            p(root, "add-ons/alpha"),
            p(root, "add-ons/beta"),
        ]
    );
}

#[test]
fn multiple_roots_concatenate_in_order() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    dirs(&first, &["layers/base"]);
    dirs(&second, &["plain"]);

    let path = layers::resolve_layered_module_path(&[first.clone(), second.clone()]).unwrap();

    assert_eq!(path, vec![first.clone(), first.join("layers/base"), second]);
}

#[test]
fn custom_layout_reads_system_layers() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(root, &["system/layers/base", "system/add-ons/extra"]);
    let layout = LayoutConfig {
        layers_dir: "system/layers".into(),
        add_ons_dir: "system/add-ons".into(),
        ..LayoutConfig::default()
    };

    let path = LayeredPathResolver::filesystem(layout)
        .resolve_layered_module_path(&[root.to_path_buf()])
        .unwrap();

    assert_eq!(
        path,
        vec![
            p(root, ""),
            p(root, "system/layers/base"),
            p(root, "system/add-ons/extra"),
        ]
    );
}

#[test]
fn discover_exposes_structure() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    file(root, "layers.conf", "layers=top,base\n");
    dirs(root, &["layers/top", "layers/base/.overlays/p1"]);
    file(root, "layers/base/.overlays/.overlays", "p1\n");

    let layered = LayeredPathResolver::filesystem(LayoutConfig::default())
        .discover(root)
        .unwrap();

    let names: Vec<&str> = layered.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["top", "base"]);
    assert!(layered.layers[0].overlays.is_empty());
    assert_eq!(
        layered.layers[1].overlays,
        vec![p(root, "layers/base/.overlays/p1")]
    );
    assert!(layered.add_ons.is_empty());
}

#[test]
fn absolute_layer_name_cannot_escape_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let outside = temp.path().join("outside");
    dirs(&root, &["layers/base"]);
    fs::create_dir_all(&outside).unwrap();
    file(
        &root,
        "layers.conf",
        &format!("layers={},base\n", outside.display()),
    );

    let err = layers::resolve_layered_module_path(&[root.clone()]).unwrap_err();

    match err {
        LayerError::InvalidLayerName { root: reported, name } => {
            assert_eq!(reported, root);
            assert_eq!(PathBuf::from(name), outside);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn absolute_overlay_name_cannot_escape_layer() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let outside = temp.path().join("outside");
    dirs(&root, &["layers/base/.overlays"]);
    fs::create_dir_all(&outside).unwrap();
    file(
        &root,
        "layers/base/.overlays/.overlays",
        &format!("{}\n", outside.display()),
    );

    let err = layers::resolve_layered_module_path(&[root.clone()]).unwrap_err();

    match err {
        LayerError::InvalidOverlayName { path, name } => {
            assert_eq!(path, root.join("layers/base/.overlays/.overlays"));
            assert_eq!(PathBuf::from(name), outside);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parent_overlay_name_cannot_escape_layer() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    dirs(root, &["layers/base/.overlays", "layers/top"]);
    file(root, "layers/base/.overlays/.overlays", "../../top\n");

    let err = layers::resolve_layered_module_path(&[root.to_path_buf()]).unwrap_err();

    assert!(matches!(err, LayerError::InvalidOverlayName { ref name, .. } if name == "../../top"));
}

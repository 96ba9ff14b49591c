//! Building manifest trees from real directories and persisting them

use super::test_utils::{canonical, create_fixture, manifest_path};
use crcgen::checksum::{ChecksumSet, BLAKE3, CRC32};
use crcgen::store::ManifestStore;
use crcgen::tree::builder::TreeBuilder;
use crcgen::tree::walker::WalkerConfig;
use crcgen::tree::DirEntry;
use tempfile::TempDir;

fn newest_file(dir: &DirEntry) -> i64 {
    dir.iter_files().map(|f| f.last_modified).max().unwrap_or(0)
}

#[test]
fn test_directory_times_match_newest_file_below() {
    let temp_dir = TempDir::new().unwrap();
    create_fixture(
        temp_dir.path(),
        &[
            ("a.txt", "a"),
            ("docs/guide.md", "guide"),
            ("docs/api/index.html", "<html/>"),
            ("src/main.rs", "fn main() {}"),
        ],
    );

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf()).build().unwrap();

    assert_eq!(tree.path, canonical(temp_dir.path()).to_string_lossy());
    assert_eq!(tree.file_count(), 4);
    assert_eq!(tree.last_modified, newest_file(&tree));
    for dir in &tree.subdirs {
        assert_eq!(dir.last_modified, newest_file(dir), "dir: {}", dir.path);
    }

    let docs = &tree.subdirs[0];
    assert_eq!(docs.name(), "docs");
    assert_eq!(docs.subdirs[0].name(), "api");
    assert_eq!(docs.subdirs[0].files[0].name(), "index.html");
}

#[test]
fn test_manifest_inside_root_is_excluded() {
    let temp_dir = TempDir::new().unwrap();
    create_fixture(temp_dir.path(), &[("one.txt", "1"), ("two/three.txt", "3")]);
    let manifest = manifest_path(temp_dir.path(), "crcgen.yaml");

    let store = ManifestStore::default();
    store.start(&manifest).unwrap();

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf())
        .skip_path(store.path().unwrap())
        .build()
        .unwrap();
    assert_eq!(tree.file_count(), 2);
    assert!(tree.iter_files().all(|f| !f.path.ends_with("crcgen.yaml")));

    store.write(&tree).unwrap();

    let reloaded = ManifestStore::default();
    reloaded.start(&manifest).unwrap();
    assert_eq!(reloaded.root(), tree);
}

#[test]
fn test_multiple_algorithms() {
    let temp_dir = TempDir::new().unwrap();
    create_fixture(temp_dir.path(), &[("hello.txt", "hello")]);

    let checksums = ChecksumSet::from_names(&["crc32", "BLAKE3"]).unwrap();
    let tree = TreeBuilder::new(temp_dir.path().to_path_buf())
        .with_checksums(checksums)
        .build()
        .unwrap();

    let file = &tree.files[0];
    assert_eq!(file.checksums[CRC32], "3610a686");
    assert_eq!(file.checksums[BLAKE3], blake3::hash(b"hello").to_hex().as_str());
}

#[test]
fn test_walker_config_limits_depth_and_ignores() {
    let temp_dir = TempDir::new().unwrap();
    create_fixture(
        temp_dir.path(),
        &[
            ("top.txt", "t"),
            ("level1/mid.txt", "m"),
            ("level1/level2/bottom.txt", "b"),
            ("node_modules/pkg/index.js", "x"),
        ],
    );

    let config = WalkerConfig {
        max_depth: Some(2),
        ignore_patterns: vec!["node_modules".to_string()],
        ..Default::default()
    };
    let tree = TreeBuilder::new(temp_dir.path().to_path_buf())
        .with_walker_config(config)
        .build()
        .unwrap();

    let names: Vec<String> = tree.iter_files().map(|f| f.name()).collect();
    assert_eq!(names, vec!["top.txt", "mid.txt"]);
    assert_eq!(tree.subdirs.len(), 1);
    assert_eq!(tree.subdirs[0].subdirs[0].name(), "level2");
    assert!(tree.subdirs[0].subdirs[0].files.is_empty());
}

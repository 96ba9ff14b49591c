//! Manifest store lifecycle: start, load, write, reload

use super::test_utils::manifest_path;
use crcgen::codec::CodecRegistry;
use crcgen::error::ErrorKind;
use crcgen::store::ManifestStore;
use crcgen::tree::{DirEntry, FileEntry};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tree_with_checksums() -> DirEntry {
    let mut readme = FileEntry::new("/proj/README.md", 12, 1_700_000_100);
    readme.checksums.insert("CRC32".to_string(), "0a1b2c3d".to_string());
    let mut lib = FileEntry::new("/proj/src/lib.rs", 800, 1_700_000_500);
    lib.checksums.insert("CRC32".to_string(), String::new());

    DirEntry::construct(
        "",
        "/proj",
        vec![DirEntry::construct("src", "/proj", vec![], vec![lib], 0)],
        vec![readme],
        0,
    )
}

#[test]
fn test_write_then_reload_every_format() {
    let temp_dir = TempDir::new().unwrap();

    for name in ["tree.json", "tree.yaml", "tree.YML", "tree.toml"] {
        let path = manifest_path(temp_dir.path(), name);

        let writer = ManifestStore::default();
        writer.start(&path).unwrap();
        writer.write(&tree_with_checksums()).unwrap();

        let reader = ManifestStore::default();
        reader.start(&path).unwrap();
        assert_eq!(reader.root(), tree_with_checksums(), "format: {name}");
        assert_eq!(reader.root().last_modified, 1_700_000_500);
    }
}

#[test]
fn test_start_with_empty_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = manifest_path(temp_dir.path(), "empty.yaml");
    fs::write(&path, "").unwrap();

    let store = ManifestStore::default();
    store.start(&path).unwrap();
    assert_eq!(store.root(), DirEntry::default());
}

#[test]
fn test_same_error_returned_on_every_start() {
    let store = ManifestStore::default();

    let first = store.start("/tmp/").unwrap_err();
    let second = store.start("valid.json").unwrap_err();
    let third = store.start("").unwrap_err();

    assert_eq!(first.kind(), ErrorKind::InvalidFile);
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(second, third));
}

#[test]
fn test_unregistered_extension_with_custom_registry() {
    let temp_dir = TempDir::new().unwrap();
    let mut registry = CodecRegistry::new();
    registry.register(crcgen::codec::YamlCodec);
    let store = ManifestStore::new(registry);

    let err = store
        .start(&manifest_path(temp_dir.path(), "out.json"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidExtension);
}

#[test]
fn test_loaded_manifest_then_codec_removed() {
    let temp_dir = TempDir::new().unwrap();
    let path = manifest_path(temp_dir.path(), "existing.json");
    fs::write(&path, r#"{"Path":"/x","Dirs":[],"Files":[],"LastMod":0}"#).unwrap();

    let store = ManifestStore::default();
    store.start(&path).unwrap();
    assert_eq!(store.root().path, "/x");

    store.deregister_codec("json");
    assert_eq!(
        store.write(&DirEntry::default()).unwrap_err().kind(),
        ErrorKind::HandlerNotFound
    );
}

#[test]
fn test_failed_write_keeps_previous_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let path = manifest_path(temp_dir.path(), "keep.json");

    let store = ManifestStore::default();
    store.start(&path).unwrap();
    store.write(&tree_with_checksums()).unwrap();
    let before = fs::read(&path).unwrap();

    store.deregister_codec("json");
    assert!(store.write(&DirEntry::default()).is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.root(), tree_with_checksums());
}

#[cfg(unix)]
#[test]
fn test_created_and_written_manifest_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = manifest_path(temp_dir.path(), "private.toml");

    let store = ManifestStore::default();
    store.start(&path).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);

    store.write(&tree_with_checksums()).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_invalid_relative_path_creates_nothing() {
    // Validation fails before touching the filesystem, so no file is created
    let store = ManifestStore::default();
    let err = store.start("relative/manifest.mp4").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidExtension);
    assert!(!Path::new("relative/manifest.mp4").exists());
}

#[test]
fn test_process_wide_store() {
    use std::sync::OnceLock;

    static STORE: OnceLock<ManifestStore> = OnceLock::new();
    let temp_dir = TempDir::new().unwrap();
    let path = manifest_path(temp_dir.path(), "global.json");

    let store = STORE.get_or_init(ManifestStore::default);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| store.start(&path).unwrap());
        }
    });
    assert_eq!(store.path().unwrap(), Path::new(&path));
}

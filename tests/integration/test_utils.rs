//! Shared test utilities for integration tests
//!
//! Fixture directories and isolated environment setup for config loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 2] = ["HOME", "XDG_CONFIG_HOME"];

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and `vars`
/// set, restoring the previous environment afterwards.
///
/// The platform config directory for crcgen is `test_dir/crcgen` on Linux.
pub fn with_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let names: Vec<&str> = ISOLATED_VARS
        .iter()
        .copied()
        .chain(vars.iter().map(|(name, _)| *name))
        .collect();
    let saved: Vec<(&str, Option<String>)> = names
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let home = test_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    result
}

/// Create a directory tree from `(relative path, content)` pairs
pub fn create_fixture(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Manifest path inside `dir` as the string form the store accepts
pub fn manifest_path(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

/// Canonical form of a temp path, for comparing against builder output
pub fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap()
}

//! Layered configuration loading against a real environment

use super::test_utils::with_config_env;
use crcgen::cli::RunContext;
use crcgen::config::{global_config_path, ConfigLoader, WORKSPACE_CONFIG_FILE};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    fs::create_dir(&workspace).unwrap();
    fs::write(
        workspace.join(WORKSPACE_CONFIG_FILE),
        "[manifest]\noutput = \"from-file.json\"\n",
    )
    .unwrap();

    let config = with_config_env(
        &test_dir,
        &[
            ("CRCGEN__MANIFEST__OUTPUT", "from-env.toml"),
            ("CRCGEN__MANIFEST__ALGORITHMS", "crc32,blake3"),
        ],
        || ConfigLoader::load(&workspace).unwrap(),
    );

    assert_eq!(config.manifest.output, "from-env.toml");
    assert_eq!(config.manifest.algorithms, vec!["crc32", "blake3"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_global_file_from_config_home() {
    let test_dir = TempDir::new().unwrap();
    let global_dir = test_dir.path().join("crcgen");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.toml"),
        "[walker]\nfollow_symlinks = true\n",
    )
    .unwrap();

    let (path, config) = with_config_env(&test_dir, &[], || {
        (
            global_config_path(),
            ConfigLoader::load(test_dir.path()).unwrap(),
        )
    });

    assert_eq!(path.unwrap(), global_dir.join("config.toml"));
    assert!(config.walker.follow_symlinks);
    assert_eq!(config.manifest.output, "crcgen.json");
}

#[test]
fn test_run_context_rejects_invalid_workspace_config() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    fs::create_dir(&workspace).unwrap();
    fs::write(
        workspace.join(WORKSPACE_CONFIG_FILE),
        "[manifest]\nalgorithms = [\"sha1\"]\n",
    )
    .unwrap();

    let result = with_config_env(&test_dir, &[], || RunContext::new(&workspace, None));
    let err = result.err().unwrap();
    assert!(err.to_string().contains("sha1"));
}

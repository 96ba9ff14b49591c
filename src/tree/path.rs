//! Path resolution and normalization utilities

use crate::error::WalkError;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Resolve a path to an absolute one without touching the filesystem.
///
/// Relative paths are joined onto the working directory. Unlike
/// [`canonicalize_path`] the target does not need to exist, which is what the
/// manifest store needs before it creates the file.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(dunce::simplified(&absolute).to_path_buf())
}

/// Canonicalize an existing path (resolves symlinks, `..`, `.`)
///
/// The result still names the file on disk byte for byte; use
/// [`manifest_path_string`] for the form recorded in a manifest.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, WalkError> {
    // Use dunce for cross-platform canonicalization
    dunce::canonicalize(path).map_err(|e| {
        WalkError::InvalidPath(format!("Failed to canonicalize {:?}: {}", path, e))
    })
}

/// The string a manifest records for a path on disk
///
/// Lossy: names that are not valid UTF-8 get replacement characters, and the
/// result is NFC. Never open a file through this string.
pub fn manifest_path_string(path: &Path) -> String {
    normalize_path_string(&path.to_string_lossy())
}

/// Normalize a path string as it is recorded in a manifest
///
/// Unicode is normalized to NFC so the same name written by different
/// platforms compares equal, and trailing separators are removed (except root).
pub fn normalize_path_string(path: &str) -> String {
    let mut result: String = path.nfc().collect();
    if result.len() > 1 {
        while result.ends_with('/') || result.ends_with('\\') {
            result.pop();
        }
    }

    result
}

//! Manifest path validation and resolution

use crate::codec::{normalize_extension, CodecRegistry};
use crate::error::ManifestError;
use crate::tree::path::absolutize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A validated manifest location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute path to the manifest file
    pub path: PathBuf,
    /// Normalized extension used to select the codec
    pub extension: String,
}

/// Validate a raw manifest path and make it absolute
///
/// Fails with `InvalidFile` when the path names no file (empty, trailing
/// separator, `..`), with `InvalidExtension` when the file has no extension or
/// no codec is registered for it, and with `AbsPathResolution` when the
/// working directory cannot be determined.
pub fn resolve(raw_path: &str, registry: &CodecRegistry) -> Result<ResolvedPath, ManifestError> {
    let file_name = file_name(raw_path).ok_or_else(|| {
        debug!(path = raw_path, "Output path names no file");
        ManifestError::InvalidFile {
            path: raw_path.to_string(),
        }
    })?;

    let extension = extension_of(file_name);
    if extension.is_empty() || !registry.is_supported(&extension) {
        debug!(path = raw_path, extension = %extension, "Unsupported output extension");
        return Err(ManifestError::InvalidExtension {
            path: raw_path.to_string(),
            extension,
        });
    }

    let raw = Path::new(raw_path);
    if raw.parent().map_or(true, |p| p.as_os_str().is_empty()) {
        debug!(path = raw_path, "No directory in output path, defaulting to working directory");
    }

    let path = absolutize(raw).map_err(|source| ManifestError::AbsPathResolution {
        path: raw_path.to_string(),
        source,
    })?;

    Ok(ResolvedPath { path, extension })
}

/// Final component of a path when it names a file
///
/// A trailing separator means the path names a directory, even though
/// [`Path::file_name`] would ignore it.
fn file_name(raw_path: &str) -> Option<&str> {
    if raw_path.is_empty() || raw_path.ends_with(std::path::is_separator) {
        return None;
    }

    Path::new(raw_path).file_name().and_then(|name| name.to_str())
}

/// Text after the last dot of a file name, normalized
///
/// Unlike [`Path::extension`] a leading-dot name such as `.json` counts as
/// having the extension `json`.
fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| normalize_extension(ext))
        .unwrap_or_default()
}

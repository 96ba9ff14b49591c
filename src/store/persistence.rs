//! Manifest file access
//!
//! Creation, reading and replacement of the manifest file. New files are
//! created readable and writable by the owner only.

use crate::error::{CodecError, ManifestError};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(unix)]
const OWNER_ONLY: u32 = 0o600;

/// Make sure a regular file exists at `path`, creating an empty one if needed
pub fn ensure_file(path: &Path) -> Result<(), ManifestError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Err(ManifestError::PathIsDirectory {
            path: path.to_path_buf(),
        }),
        Ok(_) => {
            debug!(path = %path.display(), "Manifest file exists");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => create_empty(path),
        Err(source) => Err(not_writable(path, source)),
    }
}

fn create_empty(path: &Path) -> Result<(), ManifestError> {
    let file = owner_only()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| not_writable(path, e))?;

    // Dropping a File swallows close errors; flush to disk first so they surface
    file.sync_all().map_err(|e| not_writable(path, e))?;
    drop(file);

    info!(path = %path.display(), "Created manifest file");
    Ok(())
}

/// Read the whole manifest
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, ManifestError> {
    fs::read(path).map_err(|e| ManifestError::ReadFailure {
        path: path.to_path_buf(),
        source: CodecError::Io(e),
    })
}

/// Replace the manifest's contents with `bytes`
///
/// The bytes go to a sibling temporary file that is renamed over the manifest
/// once fully written, so a failed write leaves the previous manifest intact.
/// A symlinked manifest is replaced at its target and the link is kept. A
/// manifest without write permission is left untouched.
pub fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), ManifestError> {
    let target = replace_target(path)?;
    let temp_path = temp_path_for(&target);

    if let Err(e) = write_temp(&temp_path, bytes) {
        remove_temp(&temp_path);
        return Err(not_writable(path, e));
    }

    fs::rename(&temp_path, &target).map_err(|e| {
        remove_temp(&temp_path);
        not_writable(path, e)
    })?;

    Ok(())
}

/// The file the rename must land on
fn replace_target(path: &Path) -> Result<PathBuf, ManifestError> {
    let target = match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = dunce::canonicalize(path).map_err(|e| not_writable(path, e))?;
            debug!(link = %path.display(), target = %target.display(), "Following manifest symlink");
            target
        }
        _ => path.to_path_buf(),
    };

    match fs::metadata(&target) {
        Ok(metadata) if metadata.permissions().readonly() => Err(not_writable(
            path,
            std::io::Error::new(ErrorKind::PermissionDenied, "manifest is read-only"),
        )),
        _ => Ok(target),
    }
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = owner_only()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)?;
    restrict(&file)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn remove_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %temp_path.display(), error = %e, "Failed to remove temporary manifest");
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn owner_only() -> OpenOptions {
    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OWNER_ONLY);
    }
    options
}

/// The open mode only applies to new files; a leftover temp file keeps its own
#[cfg(unix)]
fn restrict(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(OWNER_ONLY))
}

#[cfg(not(unix))]
fn restrict(_file: &File) -> std::io::Result<()> {
    Ok(())
}

fn not_writable(path: &Path, source: std::io::Error) -> ManifestError {
    ManifestError::NotWritable {
        path: path.to_path_buf(),
        source,
    }
}

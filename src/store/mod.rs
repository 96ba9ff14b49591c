//! Manifest Store
//!
//! Owns the manifest file for the life of the process: validates its path once,
//! loads the tree it holds, and writes replacement trees back to disk.

pub mod persistence;
pub mod resolve;

pub use resolve::ResolvedPath;

use crate::codec::{Codec, CodecRegistry};
use crate::error::ManifestError;
use crate::tree::DirEntry;
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, instrument};

/// Persistent manifest bound to a single file
///
/// [`start`](Self::start) runs at most once per store; its first outcome is
/// returned to every later caller. Keep one store for the life of the process
/// (a `static` works) to get process-wide one-time initialization.
pub struct ManifestStore {
    registry: RwLock<CodecRegistry>,
    started: OnceLock<Result<ResolvedPath, ManifestError>>,
    root: Mutex<DirEntry>,
}

impl Default for ManifestStore {
    fn default() -> Self {
        Self::new(CodecRegistry::with_defaults())
    }
}

impl ManifestStore {
    pub fn new(registry: CodecRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            started: OnceLock::new(),
            root: Mutex::new(DirEntry::default()),
        }
    }

    /// Bind the store to `raw_path` and load the tree it holds.
    ///
    /// Only the first call does any work. Every call, including concurrent
    /// ones, returns that first outcome regardless of its own argument, and a
    /// failed first call is never retried.
    pub fn start(&self, raw_path: &str) -> Result<(), &ManifestError> {
        self.started
            .get_or_init(|| self.initialize(raw_path))
            .as_ref()
            .map(|_| ())
    }

    #[instrument(skip(self))]
    fn initialize(&self, raw_path: &str) -> Result<ResolvedPath, ManifestError> {
        let resolved = resolve::resolve(raw_path, &self.registry.read())?;
        persistence::ensure_file(&resolved.path)?;

        let bytes = persistence::read_bytes(&resolved.path)?;
        if bytes.is_empty() {
            debug!(path = %resolved.path.display(), "Manifest is empty, starting from an empty tree");
            return Ok(resolved);
        }

        let codec = self.codec_for(&resolved.extension)?;
        let tree = codec
            .decode(&bytes)
            .map_err(|source| ManifestError::ReadFailure {
                path: resolved.path.clone(),
                source,
            })?;

        info!(
            path = %resolved.path.display(),
            files = tree.file_count(),
            "Loaded manifest"
        );
        *self.root.lock() = tree;
        Ok(resolved)
    }

    /// Encode `tree` and replace the manifest file with it
    ///
    /// On success the in-memory root becomes a copy of `tree`.
    #[instrument(skip_all)]
    pub fn write(&self, tree: &DirEntry) -> Result<(), ManifestError> {
        let resolved = self.resolved().ok_or(ManifestError::NotStarted)?;

        let codec = self.codec_for(&resolved.extension)?;
        let bytes = codec
            .encode(tree, true)
            .map_err(|source| ManifestError::EncodeFailure {
                path: resolved.path.clone(),
                source,
            })?;

        persistence::write_replace(&resolved.path, &bytes)?;
        *self.root.lock() = tree.clone();

        info!(
            path = %resolved.path.display(),
            bytes = bytes.len(),
            files = tree.file_count(),
            "Wrote manifest"
        );
        Ok(())
    }

    /// Copy of the in-memory tree
    pub fn root(&self) -> DirEntry {
        self.root.lock().clone()
    }

    /// Run `f` with exclusive access to the in-memory tree
    pub fn with_root<R>(&self, f: impl FnOnce(&mut DirEntry) -> R) -> R {
        f(&mut self.root.lock())
    }

    /// Absolute manifest path after a successful start
    pub fn path(&self) -> Option<&Path> {
        self.resolved().map(|r| r.path.as_path())
    }

    /// Normalized manifest extension after a successful start
    pub fn extension(&self) -> Option<&str> {
        self.resolved().map(|r| r.extension.as_str())
    }

    pub fn is_started(&self) -> bool {
        self.resolved().is_some()
    }

    pub fn register_codec<C: Codec + 'static>(&self, codec: C) {
        self.registry.write().register(codec);
    }

    pub fn deregister_codec(&self, ext: &str) -> Option<Arc<dyn Codec>> {
        self.registry.write().deregister(ext)
    }

    /// Extensions the store can currently read and write
    pub fn extensions(&self) -> Vec<String> {
        self.registry.read().extensions()
    }

    /// Extensions paired with the codec handling each
    pub fn formats(&self) -> Vec<(String, &'static str)> {
        self.registry.read().entries()
    }

    fn resolved(&self) -> Option<&ResolvedPath> {
        self.started.get().and_then(|outcome| outcome.as_ref().ok())
    }

    fn codec_for(&self, extension: &str) -> Result<Arc<dyn Codec>, ManifestError> {
        self.registry
            .read()
            .lookup(extension)
            .ok_or_else(|| ManifestError::HandlerNotFound {
                extension: extension.to_string(),
            })
    }
}

impl std::fmt::Debug for ManifestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestStore")
            .field("path", &self.path())
            .field("started", &self.started.get().is_some())
            .field("registry", &*self.registry.read())
            .finish()
    }
}

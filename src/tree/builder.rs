//! Tree builder for assembling a manifest tree from the filesystem

use crate::checksum::ChecksumSet;
use crate::error::WalkError;
use crate::tree::entry::{DirEntry, FileEntry};
use crate::tree::path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Builds a [`DirEntry`] tree for a directory on disk
pub struct TreeBuilder {
    root: PathBuf,
    walker_config: Option<WalkerConfig>,
    checksums: ChecksumSet,
    skip: Vec<PathBuf>,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: None,
            checksums: ChecksumSet::default(),
            skip: Vec::new(),
        }
    }

    /// Set walker config (ignore patterns, etc.)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Algorithms computed for every file
    pub fn with_checksums(mut self, checksums: ChecksumSet) -> Self {
        self.checksums = checksums;
        self
    }

    /// Leave a file out of the tree, typically the manifest itself
    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip.push(path.into());
        self
    }

    /// Walk the root and assemble the tree
    ///
    /// Directories are assembled deepest first so every node is constructed
    /// with its children already in place, which also aggregates each
    /// directory's last-modified time on the way up.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<DirEntry, WalkError> {
        let start = Instant::now();
        info!("Starting tree build");

        let root = path::canonicalize_path(&self.root)?;
        let skip: Vec<PathBuf> = self
            .skip
            .iter()
            .map(|p| path::canonicalize_path(p).unwrap_or_else(|_| p.clone()))
            .collect();

        let walker = match &self.walker_config {
            Some(config) => Walker::with_config(root.clone(), config.clone()),
            None => Walker::new(root.clone()),
        };
        let entries = walker.walk()?;
        debug!(entry_count = entries.len(), "Walked filesystem");

        // Group files and subdirectories under their parent; walker order is
        // sorted by path, so each group is already in name order.
        let mut files_by_dir: HashMap<PathBuf, Vec<FileEntry>> = HashMap::new();
        let mut dirs_by_parent: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        let mut directories = Vec::new();

        for entry in entries {
            match entry {
                Entry::File {
                    path: file_path,
                    size,
                    last_modified,
                } => {
                    if skip.contains(&file_path) {
                        debug!(path = %file_path.display(), "Skipping excluded file");
                        continue;
                    }
                    let parent = parent_of(&file_path, &root);
                    let mut file =
                        FileEntry::new(path::manifest_path_string(&file_path), size, last_modified);
                    file.checksums = self.checksums.empty_map();
                    self.checksums.apply(&mut file, &file_path)?;
                    files_by_dir.entry(parent).or_default().push(file);
                }
                Entry::Directory { path: dir_path } => {
                    dirs_by_parent
                        .entry(parent_of(&dir_path, &root))
                        .or_default()
                        .push(dir_path.clone());
                    directories.push(dir_path);
                }
            }
        }

        // Deepest first so children are assembled before parents
        directories.sort_by(|a, b| b.components().count().cmp(&a.components().count()));

        let mut built: HashMap<PathBuf, DirEntry> = HashMap::new();
        for dir_path in directories {
            let name = dir_path
                .file_name()
                .map(|n| path::normalize_path_string(&n.to_string_lossy()))
                .unwrap_or_default();
            let parent = parent_of(&dir_path, &root);
            let node = assemble(
                &dir_path,
                &name,
                &path::manifest_path_string(&parent),
                &mut files_by_dir,
                &dirs_by_parent,
                &mut built,
            );
            built.insert(dir_path, node);
        }

        let tree = assemble(
            &root,
            "",
            &path::manifest_path_string(&root),
            &mut files_by_dir,
            &dirs_by_parent,
            &mut built,
        );

        info!(
            file_count = tree.file_count(),
            last_modified = tree.last_modified,
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(tree)
    }
}

fn parent_of(path: &Path, root: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf())
}

fn assemble(
    dir_path: &Path,
    name: &str,
    parent_path: &str,
    files_by_dir: &mut HashMap<PathBuf, Vec<FileEntry>>,
    dirs_by_parent: &HashMap<PathBuf, Vec<PathBuf>>,
    built: &mut HashMap<PathBuf, DirEntry>,
) -> DirEntry {
    let subdirs = dirs_by_parent
        .get(dir_path)
        .map(|children| {
            children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect()
        })
        .unwrap_or_default();
    let files = files_by_dir.remove(dir_path).unwrap_or_default();

    DirEntry::construct(name, parent_path, subdirs, files, 0)
}

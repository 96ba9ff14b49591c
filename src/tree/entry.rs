//! Manifest tree entries and last-modified aggregation
//!
//! The serde field names here are the on-disk manifest format: every directory
//! level is `{Path, Dirs, Files, LastMod}` and every file is
//! `{Path, Checksums, Size, LastMod}`, in that order.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A single file recorded in the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Full path of the file
    #[serde(rename = "Path", default)]
    pub path: String,

    /// Algorithm name to digest; an empty digest means "not yet computed"
    #[serde(rename = "Checksums", default, deserialize_with = "null_as_default")]
    pub checksums: BTreeMap<String, String>,

    /// Size in bytes
    #[serde(rename = "Size", default)]
    pub size: u64,

    /// Epoch seconds, 0 when unknown
    #[serde(rename = "LastMod", default)]
    pub last_modified: i64,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, size: u64, last_modified: i64) -> Self {
        Self {
            path: path.into(),
            checksums: BTreeMap::new(),
            size,
            last_modified,
        }
    }

    /// Final path segment of the file
    pub fn name(&self) -> String {
        base_name(&self.path)
    }
}

/// A directory and everything below it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Full path of the directory
    #[serde(rename = "Path", default)]
    pub path: String,

    #[serde(rename = "Dirs", default, deserialize_with = "null_as_default")]
    pub subdirs: Vec<DirEntry>,

    #[serde(rename = "Files", default, deserialize_with = "null_as_default")]
    pub files: Vec<FileEntry>,

    /// Epoch seconds; 0 until aggregated
    #[serde(rename = "LastMod", default)]
    pub last_modified: i64,
}

impl DirEntry {
    /// Build a directory node and resolve its last-modified time immediately.
    ///
    /// `name` is joined onto `parent_path` only when it is non-empty; an empty
    /// name makes `parent_path` the node's full path, which is how roots with a
    /// pre-resolved absolute path are built.
    pub fn construct(
        name: &str,
        parent_path: &str,
        subdirs: Vec<DirEntry>,
        files: Vec<FileEntry>,
        explicit_last_modified: i64,
    ) -> Self {
        let path = if name.is_empty() {
            parent_path.to_string()
        } else {
            Path::new(parent_path)
                .join(name)
                .to_string_lossy()
                .into_owned()
        };

        let mut dir = Self {
            path,
            subdirs,
            files,
            last_modified: explicit_last_modified,
        };
        dir.compute_last_modified();
        dir
    }

    /// Final path segment of the directory
    pub fn name(&self) -> String {
        base_name(&self.path)
    }

    /// Aggregate the newest modification time below this directory.
    ///
    /// A non-zero value already on a node is returned as-is and its children
    /// are not visited. Otherwise the node takes the maximum over its direct
    /// files and the aggregated values of its subdirectories, and the result is
    /// cached on every node visited. Traversal uses an explicit stack, so tree
    /// depth is not bounded by the call stack. Dropping a tree is iterative
    /// too; `Clone`, `PartialEq` and serde still recurse.
    pub fn compute_last_modified(&mut self) -> i64 {
        if self.last_modified != 0 {
            return self.last_modified;
        }

        let root = std::mem::take(self);
        *self = aggregate(root);
        self.last_modified
    }

    /// Clear the cached value on this node only
    pub fn reset_last_modified(&mut self) {
        self.last_modified = 0;
    }

    /// Number of files in the whole tree
    pub fn file_count(&self) -> usize {
        self.iter_files().count()
    }

    /// Sum of file sizes in the whole tree
    pub fn total_size(&self) -> u64 {
        self.iter_files().map(|f| f.size).sum()
    }

    /// Every file in the tree, depth-first, directory files before subdirectories
    pub fn iter_files(&self) -> Files<'_> {
        Files {
            current: self.files.iter(),
            pending: self.subdirs.iter().rev().collect(),
        }
    }
}

impl Drop for DirEntry {
    fn drop(&mut self) {
        // Detach grandchildren before each child drops so nesting never recurses
        let mut pending = std::mem::take(&mut self.subdirs);
        while let Some(mut dir) = pending.pop() {
            pending.append(&mut dir.subdirs);
        }
    }
}

/// Depth-first iterator over the files of a [`DirEntry`]
pub struct Files<'a> {
    current: std::slice::Iter<'a, FileEntry>,
    pending: Vec<&'a DirEntry>,
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a FileEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.current.next() {
                return Some(file);
            }
            let dir = self.pending.pop()?;
            self.pending.extend(dir.subdirs.iter().rev());
            self.current = dir.files.iter();
        }
    }
}

/// A directory whose subdirectories are being aggregated
struct Frame {
    node: DirEntry,
    pending: std::vec::IntoIter<DirEntry>,
    done: Vec<DirEntry>,
    newest: i64,
}

impl Frame {
    fn open(mut node: DirEntry) -> Self {
        let subdirs = std::mem::take(&mut node.subdirs);
        let newest = node.files.iter().map(|f| f.last_modified).max().unwrap_or(0);
        Self {
            done: Vec::with_capacity(subdirs.len()),
            pending: subdirs.into_iter(),
            node,
            newest,
        }
    }

    fn absorb(&mut self, child: DirEntry) {
        self.newest = self.newest.max(child.last_modified);
        self.done.push(child);
    }

    fn close(mut self) -> DirEntry {
        self.node.subdirs = self.done;
        self.node.last_modified = self.newest;
        self.node
    }
}

fn aggregate(root: DirEntry) -> DirEntry {
    let mut stack = vec![Frame::open(root)];
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.pending.next() {
            if child.last_modified != 0 {
                frame.absorb(child);
            } else {
                stack.push(Frame::open(child));
            }
            continue;
        }

        let Some(done) = stack.pop().map(Frame::close) else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.absorb(done),
            None => finished = Some(done),
        }
    }

    finished.unwrap_or_default()
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Go-style writers emit `null` for empty lists; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! crcgen: batch file checksum generation
//!
//! Walks a directory, computes per-file checksums and records the result as a
//! directory-tree manifest in JSON, YAML or TOML. The [`store::ManifestStore`]
//! owns the manifest file; [`tree`] models and builds the tree it holds.

pub mod checksum;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tree;

pub use codec::{Codec, CodecRegistry};
pub use error::{ErrorKind, ManifestError};
pub use store::ManifestStore;
pub use tree::{DirEntry, FileEntry};

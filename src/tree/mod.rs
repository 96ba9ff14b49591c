//! Directory tree model
//!
//! Represents a directory on disk as nested [`DirEntry`]/[`FileEntry`] values,
//! together with the walker and builder that produce them.

pub mod builder;
pub mod entry;
pub mod path;
pub mod walker;

pub use entry::{DirEntry, FileEntry};

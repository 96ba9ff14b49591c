//! Per-file checksum algorithms
//!
//! Each algorithm writes one digest per file into [`FileEntry::checksums`],
//! keyed by its upper-case name (`CRC32`, `BLAKE3`).

use crate::error::ChecksumError;
use crate::tree::entry::FileEntry;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::trace;

pub const CRC32: &str = "CRC32";
pub const BLAKE3: &str = "BLAKE3";

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Running digest state, fed chunk by chunk
pub trait Digest {
    fn update(&mut self, chunk: &[u8]);

    /// Lower-case hex digest of everything fed so far
    fn finish(self: Box<Self>) -> String;
}

/// A named digest over file contents
pub trait Checksummer: Send + Sync {
    /// Key used in the manifest's `Checksums` object
    fn name(&self) -> &'static str;

    /// Fresh digest state
    fn start(&self) -> Box<dyn Digest>;

    /// Lower-case hex digest of `data`
    fn digest(&self, data: &[u8]) -> String {
        let mut digest = self.start();
        digest.update(data);
        digest.finish()
    }
}

/// CRC-32 with the IEEE polynomial
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32;

impl Checksummer for Crc32 {
    fn name(&self) -> &'static str {
        CRC32
    }

    fn start(&self) -> Box<dyn Digest> {
        Box::new(crc32fast::Hasher::new())
    }
}

impl Digest for crc32fast::Hasher {
    fn update(&mut self, chunk: &[u8]) {
        crc32fast::Hasher::update(self, chunk);
    }

    fn finish(self: Box<Self>) -> String {
        format!("{:08x}", self.finalize())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3;

impl Checksummer for Blake3 {
    fn name(&self) -> &'static str {
        BLAKE3
    }

    fn start(&self) -> Box<dyn Digest> {
        Box::new(blake3::Hasher::new())
    }
}

impl Digest for blake3::Hasher {
    fn update(&mut self, chunk: &[u8]) {
        blake3::Hasher::update(self, chunk);
    }

    fn finish(self: Box<Self>) -> String {
        hex::encode(self.finalize().as_bytes())
    }
}

/// Look up an algorithm by name, case-insensitively
pub fn checksummer_for(name: &str) -> Result<Box<dyn Checksummer>, ChecksumError> {
    match name.trim().to_ascii_uppercase().as_str() {
        CRC32 => Ok(Box::new(Crc32)),
        BLAKE3 => Ok(Box::new(Blake3)),
        _ => Err(ChecksumError::UnknownAlgorithm(name.to_string())),
    }
}

/// The set of algorithms computed for every file
pub struct ChecksumSet {
    algorithms: Vec<Box<dyn Checksummer>>,
}

impl Default for ChecksumSet {
    fn default() -> Self {
        Self {
            algorithms: vec![Box::new(Crc32)],
        }
    }
}

impl std::fmt::Debug for ChecksumSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ChecksumSet {
    /// A set with no algorithms; files keep empty checksum maps
    pub fn none() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    /// Build a set from algorithm names, dropping repeats
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ChecksumError> {
        let mut set = Self::none();
        for name in names {
            let algorithm = checksummer_for(name.as_ref())?;
            if !set.names().contains(&algorithm.name()) {
                set.algorithms.push(algorithm);
            }
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    /// The "not yet computed" map: every algorithm mapped to an empty digest
    pub fn empty_map(&self) -> BTreeMap<String, String> {
        self.algorithms
            .iter()
            .map(|a| (a.name().to_string(), String::new()))
            .collect()
    }

    /// Digest in-memory content with every algorithm
    pub fn digest_all(&self, data: &[u8]) -> BTreeMap<String, String> {
        self.algorithms
            .iter()
            .map(|a| (a.name().to_string(), a.digest(data)))
            .collect()
    }

    /// Stream the file at `source` through every algorithm and record the
    /// digests on `file`
    ///
    /// `source` is the path on disk; `file.path` is only the recorded name and
    /// may differ from it after normalization.
    pub fn apply(&self, file: &mut FileEntry, source: &Path) -> Result<(), ChecksumError> {
        if self.is_empty() {
            return Ok(());
        }

        let read_error = |source_error| ChecksumError::Read {
            path: source.to_path_buf(),
            source: source_error,
        };
        let handle = File::open(source).map_err(read_error)?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, handle);
        let mut digests: Vec<Box<dyn Digest>> =
            self.algorithms.iter().map(|a| a.start()).collect();

        loop {
            let consumed = match reader.fill_buf() {
                Ok([]) => break,
                Ok(chunk) => {
                    for digest in digests.iter_mut() {
                        digest.update(chunk);
                    }
                    chunk.len()
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(read_error(e)),
            };
            reader.consume(consumed);
        }

        file.checksums.extend(
            self.algorithms
                .iter()
                .zip(digests)
                .map(|(a, digest)| (a.name().to_string(), digest.finish())),
        );
        trace!(path = %file.path, algorithms = ?self.names(), "Computed checksums");
        Ok(())
    }
}

//! Error types for the crcgen manifest system.

use std::path::PathBuf;
use thiserror::Error;

/// Failure category of a [`ManifestError`], for callers that branch on the kind
/// rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFile,
    InvalidExtension,
    AbsPathResolution,
    PathIsDirectory,
    NotWritable,
    ReadFailure,
    EncodeFailure,
    HandlerNotFound,
    NotStarted,
}

/// Manifest store errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Could not detect output file in path: {path:?}")]
    InvalidFile { path: String },

    #[error("Output file has invalid extension {extension:?}: {path:?}")]
    InvalidExtension { path: String, extension: String },

    #[error("Couldn't convert path to absolute: {path:?}: {source}")]
    AbsPathResolution {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output path is a directory: {}", path.display())]
    PathIsDirectory { path: PathBuf },

    #[error("Output file is not writable: {}: {source}", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read manifest {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode manifest {}: {source}", path.display())]
    EncodeFailure {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("No codec registered for extension {extension:?}")]
    HandlerNotFound { extension: String },

    #[error("Manifest store has not been started")]
    NotStarted,
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManifestError::InvalidFile { .. } => ErrorKind::InvalidFile,
            ManifestError::InvalidExtension { .. } => ErrorKind::InvalidExtension,
            ManifestError::AbsPathResolution { .. } => ErrorKind::AbsPathResolution,
            ManifestError::PathIsDirectory { .. } => ErrorKind::PathIsDirectory,
            ManifestError::NotWritable { .. } => ErrorKind::NotWritable,
            ManifestError::ReadFailure { .. } => ErrorKind::ReadFailure,
            ManifestError::EncodeFailure { .. } => ErrorKind::EncodeFailure,
            ManifestError::HandlerNotFound { .. } => ErrorKind::HandlerNotFound,
            ManifestError::NotStarted => ErrorKind::NotStarted,
        }
    }
}

/// Encoding/decoding errors raised by codecs
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("Manifest is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Manifest I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Checksum computation errors
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("Unknown checksum algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Failed to read {} for checksum: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory walk and tree assembly errors
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to walk directory: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("Checksum failed: {0}")]
    Checksum(#[from] ChecksumError),

    #[error("Walk I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Command-line errors
#[derive(Debug, Error)]
pub enum CliError {
    /// A failed start; the store keeps the original error, so only its kind
    /// and message are carried here
    #[error("{message}")]
    Start { kind: ErrorKind, message: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<&ManifestError> for CliError {
    fn from(err: &ManifestError) -> Self {
        CliError::Start {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

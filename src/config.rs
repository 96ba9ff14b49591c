//! Configuration System
//!
//! Layered configuration for the `crcgen` binary: built-in defaults, the
//! user-level config file, the workspace `.crcgen.toml`, then `CRCGEN__*`
//! environment variables.

use crate::checksum::checksummer_for;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod environment;
    pub mod global_file;
    pub mod workspace_file;
}

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrcgenConfig {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Manifest output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest path used when the command line gives none
    #[serde(default = "default_output")]
    pub output: String,

    /// Checksum algorithms computed for every file
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,
}

pub(crate) fn default_output() -> String {
    "crcgen.json".to_string()
}

pub(crate) fn default_algorithms() -> Vec<String> {
    vec![crate::checksum::CRC32.to_string()]
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            algorithms: default_algorithms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Manifest(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Manifest(msg) => write!(f, "Manifest: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ManifestConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.output.trim().is_empty() {
            errors.push("Output path cannot be empty".to_string());
        }
        for name in &self.algorithms {
            if let Err(e) = checksummer_for(name) {
                errors.push(e.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl CrcgenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = self
            .manifest
            .validate()
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(ValidationError::Manifest)
            .collect();

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "Invalid format '{}'",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(ValidationError::Logging(format!(
                "Invalid output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

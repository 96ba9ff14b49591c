//! CLI route: single route table and run context. Dispatches to the manifest
//! store, the tree builder and presentation.

use crate::checksum::ChecksumSet;
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_build_summary, format_formats, format_manifest_table};
use crate::config::{ConfigLoader, CrcgenConfig};
use crate::error::{CliError, ConfigError, ManifestError};
use crate::store::ManifestStore;
use crate::tree::builder::TreeBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and the manifest
/// store the command works against.
pub struct RunContext {
    config: CrcgenConfig,
    store: ManifestStore,
}

impl RunContext {
    /// Create a run context from the workspace and an optional config file.
    pub fn new(workspace_root: &Path, config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        Self::with_config(config)
    }

    /// Create a run context from an already loaded configuration.
    pub fn with_config(config: CrcgenConfig) -> Result<Self, CliError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(messages.join("; "))
        })?;

        Ok(Self {
            config,
            store: ManifestStore::default(),
        })
    }

    pub fn config(&self) -> &CrcgenConfig {
        &self.config
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Run a command and return its text output
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Crc32 {
                root,
                output,
                algorithms,
            } => self.handle_crc32(root, output.as_deref(), algorithms),
            Commands::Show { output } => self.handle_show(output.as_deref()),
            Commands::Formats => Ok(self.handle_formats()),
        }
    }

    fn handle_crc32(
        &self,
        root: &Path,
        output: Option<&str>,
        algorithms: &[String],
    ) -> Result<String, CliError> {
        let algorithms = if algorithms.is_empty() {
            &self.config.manifest.algorithms
        } else {
            algorithms
        };
        let checksums = ChecksumSet::from_names(algorithms)?;
        let names = checksums.names();
        let manifest = self.start_store(output)?;

        let tree = TreeBuilder::new(root.to_path_buf())
            .with_walker_config(self.config.walker.clone())
            .with_checksums(checksums)
            .skip_path(manifest.clone())
            .build()?;

        self.store.write(&tree)?;
        info!(manifest = %manifest.display(), files = tree.file_count(), "crc32 finished");

        Ok(format_build_summary(&tree, &manifest, &names))
    }

    fn handle_show(&self, output: Option<&str>) -> Result<String, CliError> {
        let manifest = self.start_store(output)?;
        Ok(self
            .store
            .with_root(|root| format_manifest_table(root, &manifest)))
    }

    fn handle_formats(&self) -> String {
        format_formats(&self.store.formats())
    }

    /// Start the store on the requested manifest, or the configured default
    fn start_store(&self, output: Option<&str>) -> Result<PathBuf, CliError> {
        let raw = output.unwrap_or(&self.config.manifest.output);
        debug!(manifest = raw, "Starting manifest store");
        self.store.start(raw)?;

        self.store
            .path()
            .map(Path::to_path_buf)
            .ok_or_else(|| CliError::Manifest(ManifestError::NotStarted))
    }
}

//! Configuration loading facade: assembles sources in precedence order.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::CrcgenConfig;
use crate::error::ConfigError;
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`CrcgenConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence (lowest to highest): defaults, the global config file, the
    /// workspace `.crcgen.toml`, then `CRCGEN__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<CrcgenConfig, ConfigError> {
        Self::load_layers(global_file::global_config_path(), workspace_root)
    }

    /// Load configuration from a single file, still honoring defaults and the
    /// environment
    pub fn load_from_file(path: &Path) -> Result<CrcgenConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder);

        Ok(builder.build()?.try_deserialize()?)
    }

    pub(crate) fn load_layers(
        global_path: Option<PathBuf>,
        workspace_root: &Path,
    ) -> Result<CrcgenConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global_path.as_deref());
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: Config = builder.build()?;
        let loaded: CrcgenConfig = config.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            output = %loaded.manifest.output,
            "Configuration loaded"
        );
        Ok(loaded)
    }
}

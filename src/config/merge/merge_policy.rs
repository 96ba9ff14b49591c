//! Merge rules: defaults sit at the bottom, later sources override earlier ones.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("manifest.output", crate::config::default_output())?
        .set_default("manifest.algorithms", crate::config::default_algorithms())
}

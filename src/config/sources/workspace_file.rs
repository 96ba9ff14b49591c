//! Workspace config file source: `.crcgen.toml` at the workspace root

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = ".crcgen.toml";

/// Add the workspace config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if path.is_file() {
        builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
    } else {
        builder
    }
}

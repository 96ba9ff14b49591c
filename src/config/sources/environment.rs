//! Environment source: `CRCGEN__SECTION__KEY=value`, e.g.
//! `CRCGEN__MANIFEST__OUTPUT=out.yaml` or `CRCGEN__MANIFEST__ALGORITHMS=crc32,blake3`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "CRCGEN";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("manifest.algorithms")
            .with_list_parse_key("walker.ignore_patterns"),
    )
}

//! TOML manifest codec

use super::Codec;
use crate::error::CodecError;
use crate::tree::DirEntry;

/// Reads and writes `.toml` manifests
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn encode(&self, tree: &DirEntry, indent: bool) -> Result<Vec<u8>, CodecError> {
        let text = if indent {
            ::toml::to_string_pretty(tree)?
        } else {
            ::toml::to_string(tree)?
        };
        Ok(text.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<DirEntry, CodecError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(::toml::from_str(text)?)
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["toml".to_string()]
    }
}

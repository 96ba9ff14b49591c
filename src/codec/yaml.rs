//! YAML manifest codec

use super::Codec;
use crate::error::CodecError;
use crate::tree::DirEntry;

/// Reads and writes `.yaml`/`.yml` manifests
///
/// YAML output is always block-indented; the `indent` flag has no effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, tree: &DirEntry, _indent: bool) -> Result<Vec<u8>, CodecError> {
        Ok(serde_yaml::to_string(tree)?.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<DirEntry, CodecError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["yaml".to_string(), "yml".to_string()]
    }
}

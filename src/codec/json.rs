//! JSON manifest codec

use super::Codec;
use crate::error::CodecError;
use crate::tree::DirEntry;

/// Reads and writes `.json` manifests
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, tree: &DirEntry, indent: bool) -> Result<Vec<u8>, CodecError> {
        let bytes = if indent {
            serde_json::to_vec_pretty(tree)?
        } else {
            serde_json::to_vec(tree)?
        };
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<DirEntry, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["json".to_string()]
    }
}

//! Manifest codecs
//!
//! A codec turns a [`DirEntry`] tree into bytes and back for one or more file
//! extensions. The [`CodecRegistry`] maps normalized extensions to codecs so
//! the manifest store can pick one from the manifest's file name.

pub mod json;
pub mod toml;
pub mod yaml;

pub use self::json::JsonCodec;
pub use self::toml::TomlCodec;
pub use self::yaml::YamlCodec;

use crate::error::CodecError;
use crate::tree::DirEntry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Encoding capability for one manifest format
pub trait Codec: Send + Sync {
    /// Short format name for diagnostics
    fn name(&self) -> &'static str;

    /// Serialize a tree; `indent` asks for human-readable output
    fn encode(&self, tree: &DirEntry, indent: bool) -> Result<Vec<u8>, CodecError>;

    /// Parse a tree from manifest bytes
    fn decode(&self, bytes: &[u8]) -> Result<DirEntry, CodecError>;

    /// File extensions handled by this codec, case-insensitive
    fn supported_extensions(&self) -> Vec<String>;
}

/// Normalize an extension for registry keys: surrounding spaces and leading
/// dots are dropped and the result is lower-cased.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').trim().to_lowercase()
}

/// Extension to codec mapping
#[derive(Default, Clone)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the JSON, YAML and TOML codecs
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonCodec);
        registry.register(YamlCodec);
        registry.register(TomlCodec);
        registry
    }

    /// Register a codec under every extension it declares.
    ///
    /// An extension that is already registered is taken over by the new codec.
    pub fn register<C: Codec + 'static>(&mut self, codec: C) {
        self.register_arc(Arc::new(codec));
    }

    pub fn register_arc(&mut self, codec: Arc<dyn Codec>) {
        for ext in codec.supported_extensions() {
            let key = normalize_extension(&ext);
            if key.is_empty() {
                debug!(codec = codec.name(), raw = %ext, "Ignoring empty extension");
                continue;
            }

            if let Some(previous) = self.codecs.insert(key.clone(), Arc::clone(&codec)) {
                debug!(
                    extension = %key,
                    previous = previous.name(),
                    codec = codec.name(),
                    "Extension registered more than once, replacing codec"
                );
            }
        }
    }

    /// Remove the codec for an extension, returning it if one was registered
    pub fn deregister(&mut self, ext: &str) -> Option<Arc<dyn Codec>> {
        self.codecs.remove(&normalize_extension(ext))
    }

    pub fn is_supported(&self, ext: &str) -> bool {
        self.codecs.contains_key(&normalize_extension(ext))
    }

    /// Codec registered for an extension, if any
    pub fn lookup(&self, ext: &str) -> Option<Arc<dyn Codec>> {
        self.codecs.get(&normalize_extension(ext)).cloned()
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.codecs.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Registered extensions with the name of the codec handling each, sorted
    pub fn entries(&self) -> Vec<(String, &'static str)> {
        let mut entries: Vec<(String, &'static str)> = self
            .codecs
            .iter()
            .map(|(ext, codec)| (ext.clone(), codec.name()))
            .collect();
        entries.sort();
        entries
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

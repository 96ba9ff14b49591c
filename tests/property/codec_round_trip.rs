//! Property-based tests: every built-in codec decodes what it encodes

use super::strategies::dir_entry;
use crcgen::codec::CodecRegistry;
use proptest::prelude::*;

#[test]
fn test_round_trip_property() {
    let registry = CodecRegistry::with_defaults();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(dir_entry(), any::<bool>()), |(tree, indent)| {
            for ext in ["json", "yaml", "toml"] {
                let codec = registry.lookup(ext).unwrap();
                let bytes = codec.encode(&tree, indent).unwrap();
                let decoded = codec.decode(&bytes).unwrap();
                prop_assert_eq!(&decoded, &tree, "codec: {}", ext);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_encoding_is_deterministic() {
    let registry = CodecRegistry::with_defaults();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&dir_entry(), |tree| {
            for ext in registry.extensions() {
                let codec = registry.lookup(&ext).unwrap();
                prop_assert_eq!(
                    codec.encode(&tree, true).unwrap(),
                    codec.encode(&tree.clone(), true).unwrap()
                );
            }
            Ok(())
        })
        .unwrap();
}

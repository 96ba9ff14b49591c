//! Shared proptest strategies for manifest trees

use crcgen::tree::{DirEntry, FileEntry};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

pub fn file_entry() -> impl Strategy<Value = FileEntry> {
    (
        "[a-z0-9_./]{1,24}",
        btree_map("[A-Z0-9]{3,6}", "[0-9a-f]{0,8}", 0..3),
        // TOML integers are signed 64-bit
        0u64..(1u64 << 40),
        0i64..4_000_000_000,
    )
        .prop_map(|(path, checksums, size, last_modified)| FileEntry {
            path,
            checksums,
            size,
            last_modified,
        })
}

/// Trees up to four levels deep where every cached time is either zero or a
/// caller-chosen value
pub fn dir_entry() -> impl Strategy<Value = DirEntry> {
    let leaf = ("[a-z/]{0,12}", vec(file_entry(), 0..4), prop_oneof![Just(0i64), 1i64..1000])
        .prop_map(|(path, files, last_modified)| DirEntry {
            path,
            subdirs: Vec::new(),
            files,
            last_modified,
        });

    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            "[a-z/]{0,12}",
            vec(inner, 0..4),
            vec(file_entry(), 0..4),
            prop_oneof![3 => Just(0i64), 1 => 1i64..1000],
        )
            .prop_map(|(path, subdirs, files, last_modified)| DirEntry {
                path,
                subdirs,
                files,
                last_modified,
            })
    })
}

//! Property-based tests for last-modified aggregation

use super::strategies::dir_entry;
use crcgen::tree::DirEntry;
use proptest::prelude::*;

/// Reference aggregation, recursive and allocation-free
fn expected(dir: &DirEntry) -> i64 {
    if dir.last_modified != 0 {
        return dir.last_modified;
    }
    let files = dir.files.iter().map(|f| f.last_modified);
    let subdirs = dir.subdirs.iter().map(expected);
    files.chain(subdirs).max().unwrap_or(0)
}

proptest! {
    #[test]
    fn test_aggregation_matches_reference(mut tree in dir_entry()) {
        let want = expected(&tree);
        prop_assert_eq!(tree.compute_last_modified(), want);
        prop_assert_eq!(tree.last_modified, want);
    }

    #[test]
    fn test_aggregation_is_idempotent(mut tree in dir_entry()) {
        let first = tree.compute_last_modified();
        let snapshot = tree.clone();
        prop_assert_eq!(tree.compute_last_modified(), first);
        prop_assert_eq!(tree, snapshot);
    }

    #[test]
    fn test_aggregation_keeps_structure(mut tree in dir_entry()) {
        let files_before: Vec<String> = tree.iter_files().map(|f| f.path.clone()).collect();
        tree.compute_last_modified();
        let files_after: Vec<String> = tree.iter_files().map(|f| f.path.clone()).collect();
        prop_assert_eq!(files_before, files_after);
    }

    #[test]
    fn test_explicit_root_is_never_overwritten(mut tree in dir_entry(), explicit in 1i64..i64::MAX) {
        tree.last_modified = explicit;
        prop_assert_eq!(tree.compute_last_modified(), explicit);
    }
}

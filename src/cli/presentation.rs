//! CLI presentation: text formatting for command results.

use crate::tree::DirEntry;
use chrono::{DateTime, SecondsFormat};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Epoch seconds as RFC 3339 UTC, `-` when unknown
pub fn format_timestamp(epoch_seconds: i64) -> String {
    if epoch_seconds == 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp(epoch_seconds, 0)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| epoch_seconds.to_string())
}

/// Byte count with a binary unit suffix
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// One-paragraph result of a `crc32` run
pub fn format_build_summary(tree: &DirEntry, manifest: &Path, algorithms: &[&str]) -> String {
    format!(
        "{}\n  Root: {}\n  Files: {}\n  Total size: {}\n  Algorithms: {}\n  Last modified: {}\n  Manifest: {}",
        format_section_heading("Checksums generated"),
        tree.path,
        tree.file_count(),
        format_size(tree.total_size()),
        if algorithms.is_empty() {
            "none".to_string()
        } else {
            algorithms.join(", ")
        },
        format_timestamp(tree.last_modified),
        manifest.display()
    )
}

/// Table of every file recorded in a manifest
pub fn format_manifest_table(tree: &DirEntry, manifest: &Path) -> String {
    let heading = format_section_heading(&format!("Manifest {}", manifest.display()));
    if tree.file_count() == 0 {
        return format!("{}\n  No files recorded.", heading);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Path", "Size", "Modified", "Checksums"]);
    for file in tree.iter_files() {
        let checksums = file
            .checksums
            .iter()
            .map(|(name, digest)| {
                if digest.is_empty() {
                    format!("{}: -", name)
                } else {
                    format!("{}: {}", name, digest)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            file.path.clone(),
            format_size(file.size),
            format_timestamp(file.last_modified),
            checksums,
        ]);
    }

    format!(
        "{}\n{}\n  {} files, {}, last modified {}",
        heading,
        table,
        tree.file_count(),
        format_size(tree.total_size()),
        format_timestamp(tree.last_modified)
    )
}

/// Supported extensions and the codec handling each
pub fn format_formats(formats: &[(String, &'static str)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Extension", "Codec"]);
    for (ext, codec) in formats {
        table.add_row(vec![format!(".{}", ext), codec.to_string()]);
    }
    format!("{}\n{}", format_section_heading("Manifest formats"), table)
}

//! CLI domain: parse, route, output, and presentation only.
//! Commands dispatch through a single route table in [`RunContext`].

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_build_summary, format_formats, format_manifest_table, format_section_heading,
    format_size, format_timestamp,
};
pub use route::RunContext;

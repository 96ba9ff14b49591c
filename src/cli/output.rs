//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{CliError, ErrorKind};

/// Map a command failure to a single line for the terminal.
pub fn map_error(e: &CliError) -> String {
    match e {
        CliError::Start {
            kind: ErrorKind::InvalidExtension,
            message,
        } => format!("{} (run `crcgen formats` for supported extensions)", message),
        other => other.to_string().replace('\n', " "),
    }
}

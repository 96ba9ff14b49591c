//! crcgen CLI Binary
//!
//! Command-line interface for batch checksum generation.

use anyhow::Context;
use clap::Parser;
use crcgen::cli::{map_error, Cli, RunContext};
use crcgen::config::ConfigLoader;
use crcgen::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if logging_config.enabled {
        if let Err(e) = init_logging(Some(&logging_config)) {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    }

    info!("crcgen starting");

    let context = match RunContext::new(&cli.workspace, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = load_logging_section(cli).unwrap_or_default();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}

fn load_logging_section(cli: &Cli) -> anyhow::Result<LoggingConfig> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::load(&cli.workspace).context("loading workspace configuration")?,
    };
    Ok(config.logging)
}

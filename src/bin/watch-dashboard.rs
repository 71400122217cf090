//! Watch Dashboard CLI Binary
//!
//! Command-line interface for browsing deploys from provider executables.

use clap::Parser;
use std::process;
use tracing::{error, info};
use watch_dashboard::cli::{map_error, resolve_project_dir, Cli, RunContext};
use watch_dashboard::config::{ConfigLoader, DashboardConfig};
use watch_dashboard::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let project_dir = match resolve_project_dir(cli.project_dir.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let loaded = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&project_dir),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &settings);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(project_dir = %project_dir.display(), "Watch dashboard starting");

    let context = RunContext::new(project_dir, cli.providers_dir.clone(), &settings);
    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args over the loaded settings.
/// Precedence: explicit log flags, then --quiet/--verbose, then settings.
fn build_logging_config(cli: &Cli, settings: &DashboardConfig) -> LoggingConfig {
    let mut config = settings.logging.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        if config.output == "file" {
            config.output = "stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

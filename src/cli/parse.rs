//! CLI parse: clap types for watch-dashboard. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watch Dashboard - deploy status from pluggable provider executables
#[derive(Parser)]
#[command(name = "watch-dashboard")]
#[command(about = "Deploy status from pluggable provider executables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory (defaults to git root or cwd)
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Path to providers directory
    #[arg(long)]
    pub providers_dir: Option<PathBuf>,

    /// Settings file path (overrides default settings loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level, mirrored to stderr)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (file, stderr, stdout)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List available providers with their display names
    Providers {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the configuration fields a provider declares
    Fields {
        /// Provider identifier (file name in the providers directory)
        provider: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Fetch and show deploys from the configured provider
    Deploys {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Manage the project's provider configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the stored provider configuration
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Select the provider to fetch deploys from
    Use {
        /// Provider identifier
        provider: String,
    },
    /// Store a field value for a provider
    Set {
        /// Field key
        key: String,
        /// Field value
        value: String,
        /// Provider (defaults to the selected provider)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Remove a stored field value
    Unset {
        /// Field key
        key: String,
        /// Provider (defaults to the selected provider)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Interactively fill in every field a provider declares
    Setup {
        /// Provider (defaults to the selected provider)
        provider: Option<String>,
    },
    /// Remove the project's provider configuration file
    Reset,
}

//! Command-name contract for logging and routing.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for log records (e.g. "deploys", "config.set").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Providers { .. } => "providers".to_string(),
        Commands::Fields { .. } => "fields".to_string(),
        Commands::Deploys { .. } => "deploys".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show { .. } => "show",
        ConfigCommands::Use { .. } => "use",
        ConfigCommands::Set { .. } => "set",
        ConfigCommands::Unset { .. } => "unset",
        ConfigCommands::Setup { .. } => "setup",
        ConfigCommands::Reset => "reset",
    }
}

//! Global settings file: `<config_dir>/watch-dashboard/config.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the global settings file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "watch-dashboard").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global settings file to the builder if it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.exists() => builder.add_source(File::from(path).required(false)),
        Some(path) => {
            debug!(config_path = %path.display(), "No global settings file");
            builder
        }
        None => builder,
    }
}

//! Project settings file: `<project>/.watch-dashboard.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::Path;

/// Settings file name inside a project directory.
pub const PROJECT_CONFIG_FILE: &str = ".watch-dashboard.toml";

/// Add the project settings file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_dir: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = project_dir.join(PROJECT_CONFIG_FILE);
    if path.exists() {
        builder.add_source(File::from(path).required(false))
    } else {
        builder
    }
}

//! Settings loading facade.

use super::merge::merge_policy;
use super::sources::{global_file, project_file};
use super::DashboardConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;

/// Loads [`DashboardConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for `project_dir`.
    ///
    /// Precedence, lowest to highest: defaults, global file, project file,
    /// `WATCH_DASHBOARD__*` environment variables.
    pub fn load(project_dir: &Path) -> Result<DashboardConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = project_file::add_to_builder(builder, project_dir);
        let builder = builder.add_source(merge_policy::environment());
        Self::finish(builder.build()?)
    }

    /// Load settings from one explicit file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<DashboardConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?;
        Self::finish(config)
    }

    fn finish(config: config::Config) -> Result<DashboardConfig, ApiError> {
        let settings: DashboardConfig = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

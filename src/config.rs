//! Configuration System
//!
//! Dashboard settings (providers directory, provider timeouts, logging) loaded
//! from layered sources with the `config` crate. Provider selection and field
//! values live in the separate Config Store (see [`crate::store`]).

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::ProviderTimeouts;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::project_file::PROJECT_CONFIG_FILE;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory scanned for provider executables
    #[serde(default)]
    pub providers_dir: Option<PathBuf>,

    /// Provider invocation timeouts
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider invocation timeouts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout for `name` and `config` queries
    #[serde(default = "default_metadata_secs")]
    pub metadata_secs: u64,

    /// Timeout for the `list` query
    #[serde(default = "default_list_secs")]
    pub list_secs: u64,
}

fn default_metadata_secs() -> u64 {
    5
}

fn default_list_secs() -> u64 {
    30
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            metadata_secs: default_metadata_secs(),
            list_secs: default_list_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.metadata_secs == 0 {
            return Err("timeouts.metadata_secs must be greater than zero".to_string());
        }
        if self.list_secs == 0 {
            return Err("timeouts.list_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn provider_timeouts(&self) -> ProviderTimeouts {
        ProviderTimeouts {
            metadata: Duration::from_secs(self.metadata_secs),
            list: Duration::from_secs(self.list_secs),
        }
    }
}

impl DashboardConfig {
    /// Validate the loaded settings
    pub fn validate(&self) -> Result<(), ApiError> {
        self.timeouts.validate().map_err(ApiError::ConfigError)?;
        if let Some(dir) = &self.providers_dir {
            if dir.as_os_str().is_empty() {
                return Err(ApiError::ConfigError(
                    "providers_dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

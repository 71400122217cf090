//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "WATCH_DASHBOARD";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("timeouts.metadata_secs", 5)?
        .set_default("timeouts.list_secs", 30)
}

/// Environment source, applied last: `WATCH_DASHBOARD__TIMEOUTS__LIST_SECS=60`.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

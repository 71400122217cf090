//! Error types for the deploy watch dashboard.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Subprocess boundary errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Executable not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    #[error("Process I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a provider `list` call.
///
/// Distinct from an empty record list: `Ok(vec![])` means the provider has
/// nothing to show, any `FetchError` means the fetch itself broke.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Provider executable not found: {0}")]
    NotFound(PathBuf),

    #[error("Provider timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("Provider exited with {}", exit_code_label(.code))]
    Exited { code: Option<i32> },

    #[error("Provider could not be started: {0}")]
    Spawn(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl From<ProcessError> for FetchError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotFound(path) => FetchError::NotFound(path),
            ProcessError::TimedOut { timeout, .. } => FetchError::TimedOut(timeout),
            ProcessError::Spawn { program, source } => {
                FetchError::Spawn(format!("{}: {}", program, source))
            }
            ProcessError::Io(e) => FetchError::Spawn(e.to_string()),
        }
    }
}

/// Application-level errors surfaced by the CLI and configuration layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown provider: {0}. Run `watch-dashboard providers` to see what is available.")]
    UnknownProvider(String),

    #[error("No provider configured. Run `watch-dashboard config use <provider>` first.")]
    NoProviderConfigured,

    #[error("Failed to fetch deploys: {0}")]
    Fetch(#[from] FetchError),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

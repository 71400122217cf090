//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, FetchError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Fetch(FetchError::TimedOut(_)) => format!(
            "{}\nThe provider did not answer in time; raise timeouts.list_secs if it is just slow.",
            e
        ),
        ApiError::Fetch(FetchError::Exited { .. }) => format!(
            "{}\nRun with --verbose to see the provider's stderr.",
            e
        ),
        _ => e.to_string(),
    }
}

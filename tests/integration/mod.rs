//! Integration tests for provider discovery, negotiation, fetching and the CLI

mod cli_end_to_end;
mod fetch_pipeline;
mod provider_discovery;
mod test_utils;

pub use test_utils::*;

//! Deploy Fetcher: configuration injection and the `list` call.
//!
//! The result is two-state: `Ok(records)` (possibly empty, including when no
//! provider is configured) versus `Err(FetchError)` when the provider call
//! itself broke. Configuration is only ever read here.

use crate::diagnostics::Diagnostic;
use crate::error::FetchError;
use crate::provider::protocol::{env_var_name, stringify_value};
use crate::provider::{ConfigField, DeployRecord, Provider, ProviderEnv, ProviderRegistry};
use crate::store::ConfigStore;
use serde_json::{Map, Value};

/// Fetch deploy records for the provider selected in `store`.
pub fn fetch_deploys(
    store: &dyn ConfigStore,
    registry: &ProviderRegistry,
) -> Result<Vec<DeployRecord>, FetchError> {
    let config = store.read();
    let sink = registry.sink();

    let Some(provider_id) = config.provider() else {
        sink.emit(Diagnostic::NoProviderConfigured);
        return Ok(Vec::new());
    };

    let provider = registry.provider(provider_id);
    if !provider.is_executable() {
        sink.emit(Diagnostic::ProviderNotExecutable {
            path: provider.path().to_path_buf(),
        });
        return Ok(Vec::new());
    }

    fetch_from(&provider, config.provider_settings(provider_id))
}

/// Negotiate the schema of `provider`, inject `settings`, and list deploys.
pub fn fetch_from(
    provider: &dyn Provider,
    settings: Option<&Map<String, Value>>,
) -> Result<Vec<DeployRecord>, FetchError> {
    let fields = provider.config_fields();
    let env = build_provider_env(&fields, settings);
    provider.list(&env)
}

/// Environment for a `list` call: every schema field, from stored settings
/// or the field default, under its `DEPLOY_WATCH_` name.
///
/// Only the injected variables are returned; the process environment is
/// inherited on top of which these are set.
pub fn build_provider_env(
    fields: &[ConfigField],
    settings: Option<&Map<String, Value>>,
) -> ProviderEnv {
    fields
        .iter()
        .map(|field| {
            let value = settings
                .and_then(|s| s.get(&field.key))
                .map(stringify_value)
                .unwrap_or_else(|| field.default.clone());
            (env_var_name(&field.key), value)
        })
        .collect()
}

use crate::error::ApiError;
use crate::fetch::fetch_deploys;
use crate::provider::protocol::{env_var_name, stringify_value};
use crate::provider::{ConfigField, DeployRecord, ProviderRegistry};
use crate::store::{ConfigStore, StoredConfig};
use serde::Serialize;
use std::path::PathBuf;

pub struct ProviderCommandService;

/// One discovered provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderEntry {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Result of the providers command.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderListResult {
    pub providers_dir: PathBuf,
    pub providers: Vec<ProviderEntry>,
}

/// One schema field with the variable it is injected as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    #[serde(flatten)]
    pub field: ConfigField,
    pub env_var: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<String>,
}

/// Result of the fields command.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderFieldsResult {
    pub provider: String,
    pub name: String,
    pub fields: Vec<FieldEntry>,
}

/// Result of the deploys command.
#[derive(Debug, Clone)]
pub enum DeployListResult {
    /// No provider is selected in the Config Store.
    Unconfigured,
    /// The provider answered; `records` may be empty.
    Fetched {
        provider: String,
        records: Vec<DeployRecord>,
    },
}

impl ProviderCommandService {
    pub fn list(registry: &ProviderRegistry, store: &dyn ConfigStore) -> ProviderListResult {
        let config = store.read();
        let selected = config.provider();
        let providers = registry
            .list()
            .into_iter()
            .map(|id| ProviderEntry {
                name: registry.display_name(&id),
                selected: selected == Some(id.as_str()),
                id,
            })
            .collect();
        ProviderListResult {
            providers_dir: registry.providers_dir().to_path_buf(),
            providers,
        }
    }

    pub fn fields(
        registry: &ProviderRegistry,
        store: &dyn ConfigStore,
        provider: &str,
    ) -> Result<ProviderFieldsResult, ApiError> {
        Self::require_known(registry, provider)?;
        let config = store.read();
        let settings = config.provider_settings(provider);
        let fields = registry
            .config_fields(provider)
            .into_iter()
            .map(|field| FieldEntry {
                env_var: env_var_name(&field.key),
                stored: settings
                    .and_then(|s| s.get(&field.key))
                    .map(stringify_value),
                field,
            })
            .collect();
        Ok(ProviderFieldsResult {
            provider: provider.to_string(),
            name: registry.display_name(provider),
            fields,
        })
    }

    /// Fetch deploys. A fetch failure is an error; an empty list is not.
    pub fn deploys(
        registry: &ProviderRegistry,
        store: &dyn ConfigStore,
    ) -> Result<DeployListResult, ApiError> {
        let Some(provider) = store.read().provider().map(str::to_string) else {
            return Ok(DeployListResult::Unconfigured);
        };
        let records = fetch_deploys(store, registry)?;
        Ok(DeployListResult::Fetched { provider, records })
    }

    pub fn use_provider(
        registry: &ProviderRegistry,
        store: &dyn ConfigStore,
        provider: &str,
    ) -> Result<(), ApiError> {
        Self::require_known(registry, provider)?;
        let mut config = store.read();
        config.set_provider(provider);
        store.write(&config)
    }

    /// Store `key = value` for `provider` (or the selected provider).
    ///
    /// When the provider declares a schema, `key` must be one of its fields.
    pub fn set_field(
        registry: &ProviderRegistry,
        store: &dyn ConfigStore,
        provider: Option<&str>,
        key: &str,
        value: &str,
    ) -> Result<String, ApiError> {
        let mut config = store.read();
        let provider = Self::target_provider(&config, provider)?;
        let fields = registry.config_fields(&provider);
        if !fields.is_empty() && !fields.iter().any(|f| f.key == key) {
            let known: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
            return Err(ApiError::ConfigError(format!(
                "Provider {} has no field '{}' (fields: {})",
                provider,
                key,
                known.join(", ")
            )));
        }
        config.set_field(&provider, key, value);
        store.write(&config)?;
        Ok(provider)
    }

    /// Remove `key` for `provider` (or the selected provider).
    pub fn unset_field(
        store: &dyn ConfigStore,
        provider: Option<&str>,
        key: &str,
    ) -> Result<(String, bool), ApiError> {
        let mut config = store.read();
        let provider = Self::target_provider(&config, provider)?;
        let removed = config.remove_field(&provider, key);
        if removed {
            store.write(&config)?;
        }
        Ok((provider, removed))
    }

    /// Store answers from a setup form for `provider`.
    pub fn apply_setup(
        store: &dyn ConfigStore,
        provider: &str,
        answers: &[(String, String)],
    ) -> Result<(), ApiError> {
        let mut config = store.read();
        for (key, value) in answers {
            config.set_field(provider, key, value.as_str());
        }
        store.write(&config)
    }

    /// Value a setup form should start from: stored value, else default.
    pub fn initial_value(config: &StoredConfig, provider: &str, field: &ConfigField) -> String {
        config
            .provider_settings(provider)
            .and_then(|s| s.get(&field.key))
            .map(stringify_value)
            .unwrap_or_else(|| field.default.clone())
    }

    pub fn target_provider(config: &StoredConfig, provider: Option<&str>) -> Result<String, ApiError> {
        provider
            .map(str::to_string)
            .or_else(|| config.provider().map(str::to_string))
            .ok_or(ApiError::NoProviderConfigured)
    }

    fn require_known(registry: &ProviderRegistry, provider: &str) -> Result<(), ApiError> {
        if registry.contains(provider) {
            Ok(())
        } else {
            Err(ApiError::UnknownProvider(provider.to_string()))
        }
    }
}

//! Deploy Provider Abstraction
//!
//! A provider is an external executable that answers three commands: `name`,
//! `config` and `list`. [`Provider`] is the capability interface over that
//! protocol; [`ExecutableProvider`] is the implementation that shells out, and
//! in-process doubles can implement the same trait without spawning anything.

use crate::error::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod commands;
pub mod executable;
pub mod protocol;
pub mod registry;

pub use executable::ExecutableProvider;
pub use registry::{default_providers_dir, is_executable, list_providers, ProviderRegistry};

/// Timeout for the `name` and `config` metadata queries.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the `list` data query.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeouts applied to provider invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub metadata: Duration,
    pub list: Duration,
}

impl Default for ProviderTimeouts {
    fn default() -> Self {
        Self {
            metadata: METADATA_TIMEOUT,
            list: LIST_TIMEOUT,
        }
    }
}

/// One configurable field a provider declares through `config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "deserialize_default_value")]
    pub default: String,
}

impl ConfigField {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            required: false,
            default: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Label for display, falling back to the key.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

fn deserialize_default_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        other => protocol::stringify_value(&other),
    })
}

/// One deploy record as emitted by a provider's `list` command.
///
/// The schema belongs to the provider; only `build_started` and
/// `deploy_finished` are interpreted, for elapsed-time display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployRecord {
    fields: Map<String, Value>,
}

impl DeployRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Convenience constructor from string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// String form of `key`; `None` when absent or null.
    pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(protocol::stringify_value(other))),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Environment variables injected into a provider's `list` invocation.
pub type ProviderEnv = BTreeMap<String, String>;

/// Capability interface over a deploy provider.
pub trait Provider: Send + Sync {
    /// Identifier of the provider (its file name in the providers directory).
    fn id(&self) -> &str;

    /// Human-readable name. Falls back to [`Provider::id`] on any failure.
    fn name(&self) -> String;

    /// Declared configuration fields, in provider order. Empty on any failure.
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Current deploy records, given the injected configuration environment.
    fn list(&self, env: &ProviderEnv) -> Result<Vec<DeployRecord>, FetchError>;
}

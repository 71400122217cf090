//! Config Store: provider selection and per-provider field values.
//!
//! On disk this is `.deploy-watch.json` in the project directory: a JSON object
//! with a top-level `provider` string and one sub-object per provider name.
//! The fetch path only ever reads it; writes and removal belong to the CLI.

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ApiError;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the Config Store inside a project directory.
pub const CONFIG_FILE_NAME: &str = ".deploy-watch.json";

/// Key holding the selected provider.
const PROVIDER_KEY: &str = "provider";

/// Snapshot of the Config Store contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredConfig {
    data: Map<String, Value>,
}

impl StoredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }

    /// The selected provider, if one is set to a non-empty string.
    pub fn provider(&self) -> Option<&str> {
        self.data
            .get(PROVIDER_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn set_provider(&mut self, provider: &str) {
        self.data
            .insert(PROVIDER_KEY.to_string(), Value::String(provider.to_string()));
    }

    /// Stored field values for `provider`, if any were saved.
    pub fn provider_settings(&self, provider: &str) -> Option<&Map<String, Value>> {
        self.data.get(provider).and_then(Value::as_object)
    }

    /// Store `value` under `key` for `provider`, replacing a non-object entry.
    pub fn set_field(&mut self, provider: &str, key: &str, value: impl Into<Value>) {
        let entry = self
            .data
            .entry(provider.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(settings) = entry {
            settings.insert(key.to_string(), value.into());
        }
    }

    /// Remove `key` for `provider`. Returns whether a value was removed.
    pub fn remove_field(&mut self, provider: &str, key: &str) -> bool {
        self.data
            .get_mut(provider)
            .and_then(Value::as_object_mut)
            .map(|settings| settings.remove(key).is_some())
            .unwrap_or(false)
    }
}

/// Opaque key-value persistence for [`StoredConfig`].
pub trait ConfigStore: Send + Sync {
    /// Read the current contents. Missing or unreadable state reads as empty.
    fn read(&self) -> StoredConfig;

    /// Replace the stored contents.
    fn write(&self, config: &StoredConfig) -> Result<(), ApiError>;

    /// Delete the stored contents entirely.
    fn remove(&self) -> Result<(), ApiError>;
}

/// Config Store backed by a JSON file.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sink: TracingSink::shared(),
        }
    }

    /// Report unreadable contents to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Store at `<project_dir>/.deploy-watch.json`.
    pub fn for_project(project_dir: &Path) -> Self {
        Self::new(project_dir.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, reason: String) -> StoredConfig {
        self.sink.emit(Diagnostic::ConfigUnreadable {
            path: self.path.clone(),
            reason,
        });
        StoredConfig::new()
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}

impl ConfigStore for JsonFileStore {
    fn read(&self) -> StoredConfig {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoredConfig::new(),
            Err(e) => return self.unreadable(e.to_string()),
        };
        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(data) => StoredConfig::from_map(data),
            Err(e) => self.unreadable(format!("not a JSON object: {}", e)),
        }
    }

    fn write(&self, config: &StoredConfig) -> Result<(), ApiError> {
        let mut content = serde_json::to_string_pretty(config.as_map())
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        content.push('\n');
        std::fs::write(&self.path, content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write config to {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn remove(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::ConfigError(format!(
                "Failed to remove config {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-memory Config Store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: Mutex<StoredConfig>,
}

impl MemoryStore {
    pub fn new(config: StoredConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self) -> StoredConfig {
        self.config.lock().clone()
    }

    fn write(&self, config: &StoredConfig) -> Result<(), ApiError> {
        *self.config.lock() = config.clone();
        Ok(())
    }

    fn remove(&self) -> Result<(), ApiError> {
        *self.config.lock() = StoredConfig::new();
        Ok(())
    }
}

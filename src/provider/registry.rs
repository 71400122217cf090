//! Provider discovery in a providers directory.
//!
//! Discovery is never fatal: a missing or unreadable directory simply has no
//! providers. Nothing is cached; every call looks at the directory again.

use super::{ConfigField, ExecutableProvider, Provider, ProviderTimeouts};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Executable regular files in `providers_dir`, sorted, excluding `README*`
/// and `*.md` entries.
pub fn list_providers(providers_dir: &Path, sink: &dyn DiagnosticSink) -> Vec<String> {
    let entries = match std::fs::read_dir(providers_dir) {
        Ok(entries) => entries,
        Err(e) => {
            sink.emit(Diagnostic::ProvidersDirUnreadable {
                path: providers_dir.to_path_buf(),
                reason: e.to_string(),
            });
            return Vec::new();
        }
    };

    let skipped = |reason: String| {
        sink.emit(Diagnostic::ProviderEntrySkipped {
            dir: providers_dir.to_path_buf(),
            reason,
        })
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                skipped(e.to_string());
                None
            }
        })
        .filter_map(|entry| match entry.file_name().into_string() {
            Ok(name) => Some(name),
            Err(name) => {
                skipped(format!("non-UTF8 file name {:?}", name));
                None
            }
        })
        .filter(|name| !name.starts_with("README") && !name.ends_with(".md"))
        .filter(|name| is_executable(&providers_dir.join(name)))
        .collect();
    names.sort();
    names
}

/// Whether `path` is a regular file the current process may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

/// Whether `path` is a regular file the current process may execute.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Default providers directory: `<config_dir>/watch-dashboard/providers`.
pub fn default_providers_dir() -> PathBuf {
    ProjectDirs::from("", "", "watch-dashboard")
        .map(|dirs| dirs.config_dir().join("providers"))
        .unwrap_or_else(|| PathBuf::from("providers"))
}

/// Discovery and metadata queries over one providers directory.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers_dir: PathBuf,
    timeouts: ProviderTimeouts,
    sink: Arc<dyn DiagnosticSink>,
}

impl ProviderRegistry {
    /// Registry over `providers_dir` reporting diagnostics to `tracing`.
    pub fn new(providers_dir: impl Into<PathBuf>) -> Self {
        Self::with_sink(providers_dir, TracingSink::shared())
    }

    pub fn with_sink(providers_dir: impl Into<PathBuf>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            providers_dir: providers_dir.into(),
            timeouts: ProviderTimeouts::default(),
            sink,
        }
    }

    pub fn with_timeouts(mut self, timeouts: ProviderTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn providers_dir(&self) -> &Path {
        &self.providers_dir
    }

    pub fn timeouts(&self) -> ProviderTimeouts {
        self.timeouts
    }

    pub fn sink(&self) -> Arc<dyn DiagnosticSink> {
        Arc::clone(&self.sink)
    }

    /// Available provider identifiers, sorted.
    pub fn list(&self) -> Vec<String> {
        list_providers(&self.providers_dir, self.sink.as_ref())
    }

    /// Whether `provider` names one of the discovered providers.
    pub fn contains(&self, provider: &str) -> bool {
        self.list().iter().any(|p| p == provider)
    }

    /// Handle for `provider`. The executable may not exist; callers check.
    pub fn provider(&self, provider: &str) -> ExecutableProvider {
        ExecutableProvider::new(
            provider,
            self.providers_dir.join(provider),
            self.timeouts,
            Arc::clone(&self.sink),
        )
    }

    /// Display name of `provider`, or the identifier itself on any failure.
    pub fn display_name(&self, provider: &str) -> String {
        self.provider(provider).name()
    }

    /// Configuration schema of `provider`, or empty on any failure.
    pub fn config_fields(&self, provider: &str) -> Vec<ConfigField> {
        self.provider(provider).config_fields()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers_dir", &self.providers_dir)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

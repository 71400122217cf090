//! Diagnostic events emitted by the provider pipeline.
//!
//! Components take an `Arc<dyn DiagnosticSink>` at construction instead of
//! reaching for a process-wide logger. Diagnostics are informational only:
//! emitting one never changes the outcome of the operation that produced it.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Longest prefix of a malformed `list` line carried in a diagnostic.
pub const MALFORMED_LINE_PREVIEW: usize = 120;

/// A single diagnostic from discovery, negotiation, or fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    NoProviderConfigured,
    ProviderNotExecutable { path: PathBuf },
    Invoking { path: PathBuf, command: String },
    MetadataFailed {
        provider: String,
        command: String,
        reason: String,
    },
    DuplicateField { provider: String, key: String },
    ProviderStderr { provider: String, stderr: String },
    ProviderExited { provider: String, code: Option<i32> },
    ProviderTimedOut { provider: String, timeout: Duration },
    ProviderMissing { path: PathBuf },
    ProviderSpawnFailed { provider: String, reason: String },
    MalformedLine { line: String },
    RecordsParsed { count: usize },
    ProvidersDirUnreadable { path: PathBuf, reason: String },
    ProviderEntrySkipped { dir: PathBuf, reason: String },
    PipeReadFailed { program: String, reason: String },
    ReapFailed { program: String, reason: String },
    ConfigUnreadable { path: PathBuf, reason: String },
}

impl Diagnostic {
    /// Build a malformed-line diagnostic, truncating the line preview.
    pub fn malformed_line(line: &str) -> Self {
        Diagnostic::MalformedLine {
            line: line.chars().take(MALFORMED_LINE_PREVIEW).collect(),
        }
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn shared() -> Arc<dyn DiagnosticSink> {
        Arc::new(Self)
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::NoProviderConfigured => {
                tracing::debug!("fetch_deploys: no provider configured");
            }
            Diagnostic::ProviderNotExecutable { path } => {
                tracing::warn!(path = %path.display(), "Provider script not executable");
            }
            Diagnostic::Invoking { path, command } => {
                tracing::debug!(path = %path.display(), command = %command, "Calling provider");
            }
            Diagnostic::MetadataFailed {
                provider,
                command,
                reason,
            } => {
                tracing::debug!(
                    provider = %provider,
                    command = %command,
                    "Provider metadata query failed: {}",
                    reason
                );
            }
            Diagnostic::DuplicateField { provider, key } => {
                tracing::debug!(provider = %provider, key = %key, "Ignoring duplicate config field");
            }
            Diagnostic::ProviderStderr { provider, stderr } => {
                tracing::debug!(provider = %provider, "Provider stderr: {}", stderr);
            }
            Diagnostic::ProviderExited { provider, code } => {
                tracing::warn!(provider = %provider, code = ?code, "Provider exited with failure");
            }
            Diagnostic::ProviderTimedOut { provider, timeout } => {
                tracing::error!(
                    provider = %provider,
                    "Provider timed out after {}s",
                    timeout.as_secs()
                );
            }
            Diagnostic::ProviderMissing { path } => {
                tracing::error!(path = %path.display(), "Provider script not found");
            }
            Diagnostic::ProviderSpawnFailed { provider, reason } => {
                tracing::error!(provider = %provider, "Provider could not be started: {}", reason);
            }
            Diagnostic::MalformedLine { line } => {
                tracing::warn!("Bad JSON line from provider: {}", line);
            }
            Diagnostic::RecordsParsed { count } => {
                tracing::debug!(count, "Parsed deploy records");
            }
            Diagnostic::ProvidersDirUnreadable { path, reason } => {
                tracing::debug!(path = %path.display(), "No providers directory: {}", reason);
            }
            Diagnostic::ProviderEntrySkipped { dir, reason } => {
                tracing::warn!(dir = %dir.display(), "Skipping providers directory entry: {}", reason);
            }
            Diagnostic::PipeReadFailed { program, reason } => {
                tracing::debug!(program = %program, "Failed to drain child pipe: {}", reason);
            }
            Diagnostic::ReapFailed { program, reason } => {
                tracing::warn!(program = %program, "Failed to reap child process: {}", reason);
            }
            Diagnostic::ConfigUnreadable { path, reason } => {
                tracing::warn!(path = %path.display(), "Ignoring unreadable config: {}", reason);
            }
        }
    }
}

/// Collects diagnostics in memory. Used by tests and by callers that want to
/// show diagnostics themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().push(diagnostic);
    }
}

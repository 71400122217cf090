//! Provider backed by an executable in the providers directory.

use super::protocol::{self, CONFIG_COMMAND, LIST_COMMAND, NAME_COMMAND};
use super::registry::is_executable;
use super::{ConfigField, DeployRecord, Provider, ProviderEnv, ProviderTimeouts};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{FetchError, ProcessError};
use crate::process::{run_with_timeout, CapturedOutput};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

/// Shells out to `<path> name|config|list`.
#[derive(Clone)]
pub struct ExecutableProvider {
    id: String,
    path: PathBuf,
    timeouts: ProviderTimeouts,
    sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for ExecutableProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableProvider")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl ExecutableProvider {
    pub fn new(
        id: impl Into<String>,
        path: impl Into<PathBuf>,
        timeouts: ProviderTimeouts,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            timeouts,
            sink,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_executable(&self) -> bool {
        is_executable(&self.path)
    }

    fn invoke(
        &self,
        command: &str,
        env: Option<&ProviderEnv>,
        timeout: Duration,
    ) -> Result<CapturedOutput, ProcessError> {
        self.sink.emit(Diagnostic::Invoking {
            path: self.path.clone(),
            command: command.to_string(),
        });
        let mut cmd = Command::new(&self.path);
        cmd.arg(command);
        if let Some(env) = env {
            cmd.envs(env);
        }
        run_with_timeout(&mut cmd, timeout, self.sink.as_ref())
    }

    /// Run a metadata query, reporting and absorbing every failure.
    fn query_metadata(&self, command: &str) -> Option<String> {
        let failure = match self.invoke(command, None, self.timeouts.metadata) {
            Ok(output) if output.success() => return Some(output.stdout),
            Ok(output) => format!("exited with {:?}", output.status.code()),
            Err(e) => e.to_string(),
        };
        self.sink.emit(Diagnostic::MetadataFailed {
            provider: self.id.clone(),
            command: command.to_string(),
            reason: failure,
        });
        None
    }
}

impl Provider for ExecutableProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        if !self.is_executable() {
            return self.id.clone();
        }
        self.query_metadata(NAME_COMMAND)
            .map(|stdout| stdout.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.clone())
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        if !self.is_executable() {
            return Vec::new();
        }
        self.query_metadata(CONFIG_COMMAND)
            .and_then(|stdout| protocol::parse_config_fields(&self.id, &stdout, self.sink.as_ref()))
            .unwrap_or_default()
    }

    fn list(&self, env: &ProviderEnv) -> Result<Vec<DeployRecord>, FetchError> {
        let output = match self.invoke(LIST_COMMAND, Some(env), self.timeouts.list) {
            Ok(output) => output,
            Err(e) => {
                let diagnostic = match &e {
                    ProcessError::TimedOut { timeout, .. } => Diagnostic::ProviderTimedOut {
                        provider: self.id.clone(),
                        timeout: *timeout,
                    },
                    ProcessError::NotFound(_) => Diagnostic::ProviderMissing {
                        path: self.path.clone(),
                    },
                    ProcessError::Spawn { .. } | ProcessError::Io(_) => {
                        Diagnostic::ProviderSpawnFailed {
                            provider: self.id.clone(),
                            reason: e.to_string(),
                        }
                    }
                };
                self.sink.emit(diagnostic);
                return Err(FetchError::from(e));
            }
        };

        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            self.sink.emit(Diagnostic::ProviderStderr {
                provider: self.id.clone(),
                stderr: stderr.to_string(),
            });
        }

        if !output.success() {
            let code = output.status.code();
            self.sink.emit(Diagnostic::ProviderExited {
                provider: self.id.clone(),
                code,
            });
            return Err(FetchError::Exited { code });
        }

        Ok(protocol::parse_deploy_lines(&output.stdout, self.sink.as_ref()))
    }
}

//! Shared test utilities for integration tests
//!
//! Provider fixtures are small `/bin/sh` scripts written into a temporary
//! providers directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use watch_dashboard::diagnostics::MemorySink;
use watch_dashboard::provider::{ProviderRegistry, ProviderTimeouts};

/// Short timeouts so slow-provider tests finish quickly.
pub fn short_timeouts() -> ProviderTimeouts {
    ProviderTimeouts {
        metadata: Duration::from_millis(500),
        list: Duration::from_millis(500),
    }
}

/// A project directory with a providers directory inside it.
pub struct Fixture {
    pub temp: TempDir,
    pub providers_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let providers_dir = temp.path().join("providers");
        fs::create_dir_all(&providers_dir).unwrap();
        Self {
            temp,
            providers_dir,
        }
    }

    pub fn project_dir(&self) -> &Path {
        self.temp.path()
    }

    /// Write an executable provider whose body is a shell `case` on `$1`.
    pub fn provider(&self, id: &str, cases: &str) -> PathBuf {
        write_script(&self.providers_dir, id, &format!("case \"$1\" in\n{}\nesac\n", cases))
    }

    /// Write a plain, non-executable file into the providers directory.
    pub fn plain_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.providers_dir.join(name);
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        path
    }

    /// Registry over the providers directory with a capturing sink.
    pub fn registry(&self) -> (ProviderRegistry, Arc<MemorySink>) {
        let sink = MemorySink::new();
        let registry = ProviderRegistry::with_sink(&self.providers_dir, sink.clone());
        (registry, sink)
    }
}

/// Write `body` as a `/bin/sh` script with mode 0755.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A provider with two declared fields that echoes its injected values.
pub const ECHO_PROVIDER: &str = r#"
  name) echo "Echo Deploys" ;;
  config) echo '{"fields":[{"key":"api_token","label":"API token","required":true},{"key":"team","default":"core"}]}' ;;
  list)
    echo "{\"id\":\"d1\",\"token\":\"$DEPLOY_WATCH_API_TOKEN\",\"team\":\"$DEPLOY_WATCH_TEAM\",\"build_started\":\"100\",\"deploy_finished\":\"225\"}"
    ;;
"#;

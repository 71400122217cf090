//! Wire format of the provider protocol.
//!
//! These rules are shared with existing provider scripts and must stay
//! bit-exact: the `DEPLOY_WATCH_` environment namespace, the `config` JSON
//! shape, and newline-delimited JSON objects from `list`.

use super::{ConfigField, DeployRecord};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Namespace prefix for configuration passed to providers.
pub const ENV_PREFIX: &str = "DEPLOY_WATCH_";

/// Command-line argument for each protocol query.
pub const NAME_COMMAND: &str = "name";
pub const CONFIG_COMMAND: &str = "config";
pub const LIST_COMMAND: &str = "list";

/// Environment variable carrying the value of field `key`.
///
/// `api_token` becomes `DEPLOY_WATCH_API_TOKEN`.
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

/// String form of a stored JSON value as handed to provider scripts.
///
/// Strings pass through untouched; booleans and null use the `True`/`False`/
/// `None` spelling existing scripts already expect; numbers keep their JSON
/// text and compound values are passed as compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[derive(Deserialize)]
struct ConfigResponse {
    #[serde(default)]
    fields: Vec<ConfigField>,
}

/// Parse the stdout of `<provider> config`.
///
/// Returns `None` when the output is not a JSON object whose `fields` is an
/// array of field objects. A missing `fields` key is an empty schema. Later
/// duplicates of a key are dropped.
pub fn parse_config_fields(
    provider: &str,
    stdout: &str,
    sink: &dyn DiagnosticSink,
) -> Option<Vec<ConfigField>> {
    let response: ConfigResponse = match serde_json::from_str(stdout) {
        Ok(response) => response,
        Err(e) => {
            sink.emit(Diagnostic::MetadataFailed {
                provider: provider.to_string(),
                command: CONFIG_COMMAND.to_string(),
                reason: format!("invalid config JSON: {}", e),
            });
            return None;
        }
    };

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(response.fields.len());
    for field in response.fields {
        if seen.insert(field.key.clone()) {
            fields.push(field);
        } else {
            sink.emit(Diagnostic::DuplicateField {
                provider: provider.to_string(),
                key: field.key,
            });
        }
    }
    Some(fields)
}

/// Parse the stdout of `<provider> list` into records, in output order.
///
/// Blank lines are ignored. A line that is not a JSON object is skipped and
/// reported; it never fails the whole batch.
pub fn parse_deploy_lines(stdout: &str, sink: &dyn DiagnosticSink) -> Vec<DeployRecord> {
    let mut records = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => records.push(DeployRecord::new(fields)),
            Ok(_) | Err(_) => sink.emit(Diagnostic::malformed_line(line)),
        }
    }
    sink.emit(Diagnostic::RecordsParsed {
        count: records.len(),
    });
    records
}

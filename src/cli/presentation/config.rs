//! Config Store presentation for `config show`.

use super::shared::{display_value, format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::provider::protocol::stringify_value;
use crate::store::StoredConfig;
use serde_json::{json, Value};
use std::path::Path;

pub fn format_config_show_text(path: &Path, config: &StoredConfig) -> String {
    let mut out = format!("{}\n", format_section_heading("Provider Configuration"));
    out.push_str(&format!("  File: {}\n", path.display()));
    out.push_str(&format!(
        "  Provider: {}\n",
        config.provider().unwrap_or("(none)")
    ));

    let mut sections = config
        .as_map()
        .iter()
        .filter_map(|(name, value)| value.as_object().map(|settings| (name, settings)))
        .peekable();
    if sections.peek().is_none() {
        out.push_str("\n  No provider settings stored.");
        return out;
    }
    for (name, settings) in sections {
        out.push_str(&format!("\n  [{}]\n", name));
        for (key, value) in settings {
            out.push_str(&format!(
                "    {} = {}\n",
                key,
                display_value(key, &stringify_value(value))
            ));
        }
    }
    out.trim_end().to_string()
}

/// Raw stored contents. Values are not masked.
pub fn format_config_show_json(path: &Path, config: &StoredConfig) -> Result<String, ApiError> {
    let out = json!({
        "path": path,
        "config": Value::Object(config.as_map().clone()),
    });
    to_pretty_json(&out)
}

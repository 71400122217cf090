//! Provider presentation: providers list and field schema, text/json.

use super::shared::{display_value, format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::provider::commands::{ProviderFieldsResult, ProviderListResult};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_provider_list_text(result: &ProviderListResult) -> String {
    if result.providers.is_empty() {
        return format!(
            "No providers found in {}\n\nAdd an executable there that answers `name`, `config` and `list`.",
            result.providers_dir.display()
        );
    }
    let mut out = format!("{}\n", format_section_heading("Available Providers"));
    for entry in &result.providers {
        let marker = if entry.selected {
            format!("{}", "*".green().bold())
        } else {
            " ".to_string()
        };
        out.push_str(&format!("{} {:<20} {}\n", marker, entry.id, entry.name));
    }
    out.push_str(&format!("\nTotal: {} provider(s)", result.providers.len()));
    out
}

pub fn format_provider_list_json(result: &ProviderListResult) -> Result<String, ApiError> {
    let out = json!({
        "providers_dir": result.providers_dir,
        "providers": result.providers,
        "total": result.providers.len(),
    });
    to_pretty_json(&out)
}

pub fn format_fields_text(result: &ProviderFieldsResult) -> String {
    let mut out = format!(
        "{}\n",
        format_section_heading(&format!("{} ({})", result.name, result.provider))
    );
    if result.fields.is_empty() {
        out.push_str("  This provider declares no configuration fields.");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Label", "Required", "Default", "Stored", "Variable"]);
    for entry in &result.fields {
        let field = &entry.field;
        let stored = entry
            .stored
            .as_deref()
            .map(|value| display_value(&field.key, value))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            field.key.clone(),
            field.display_label().to_string(),
            if field.required { "yes" } else { "no" }.to_string(),
            field.default.clone(),
            stored,
            entry.env_var.clone(),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_fields_json(result: &ProviderFieldsResult) -> Result<String, ApiError> {
    to_pretty_json(result)
}

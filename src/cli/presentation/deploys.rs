//! Deploy list presentation.
//!
//! Columns follow the provider's own keys in first-seen order. The two
//! timestamp fields are folded into a single Elapsed column.

use super::shared::{format_section_heading, to_pretty_json};
use crate::elapsed::{format_elapsed_at, BUILD_STARTED, DEPLOY_FINISHED};
use crate::error::ApiError;
use crate::provider::commands::DeployListResult;
use crate::provider::DeployRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};

const ELAPSED_COLUMN: &str = "Elapsed";

/// Record keys in first-seen order, without the timestamp fields.
pub fn record_columns(records: &[DeployRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in records.iter().flat_map(DeployRecord::keys) {
        if key == BUILD_STARTED || key == DEPLOY_FINISHED {
            continue;
        }
        if !columns.iter().any(|c| c == key) {
            columns.push(key.to_string());
        }
    }
    columns
}

fn has_timestamps(records: &[DeployRecord]) -> bool {
    records
        .iter()
        .any(|r| r.as_map().contains_key(BUILD_STARTED))
}

pub fn format_deploys_text(result: &DeployListResult, now: i64) -> String {
    let (provider, records) = match result {
        DeployListResult::Unconfigured => {
            return "No provider configured.\n\nRun `watch-dashboard providers` to list providers, then `watch-dashboard config use <provider>`.".to_string();
        }
        DeployListResult::Fetched { provider, records } => (provider, records),
    };
    if records.is_empty() {
        return format!("No deploys reported by {}.", provider);
    }

    let columns = record_columns(records);
    let elapsed = has_timestamps(records);
    let mut header: Vec<String> = columns.clone();
    if elapsed {
        header.push(ELAPSED_COLUMN.to_string());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header);
    for record in records {
        let mut row: Vec<String> = columns
            .iter()
            .map(|key| record.get(key).map(|v| v.into_owned()).unwrap_or_default())
            .collect();
        if elapsed {
            row.push(format_elapsed_at(record, now));
        }
        table.add_row(row);
    }

    format!(
        "{}\n{}\n\nTotal: {} deploy(s)",
        format_section_heading(&format!("Deploys ({})", provider)),
        table,
        records.len()
    )
}

/// Records as json, each with a computed `elapsed` string.
pub fn format_deploys_json(result: &DeployListResult, now: i64) -> Result<String, ApiError> {
    let out = match result {
        DeployListResult::Unconfigured => json!({ "provider": Value::Null, "deploys": [] }),
        DeployListResult::Fetched { provider, records } => {
            let deploys: Vec<Value> = records
                .iter()
                .map(|record| {
                    let mut map = record.as_map().clone();
                    map.insert(
                        "elapsed".to_string(),
                        Value::String(format_elapsed_at(record, now)),
                    );
                    Value::Object(map)
                })
                .collect();
            json!({ "provider": provider, "deploys": deploys, "total": records.len() })
        }
    };
    to_pretty_json(&out)
}

//! Shared presentation helpers: headings, json rendering, secret masking.

use crate::error::ApiError;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Key fragments whose values are masked in text output.
const SECRET_MARKERS: [&str; 4] = ["token", "secret", "password", "key"];

/// Section heading in bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render json: {}", e)))
}

/// Whether a field key looks like it holds a credential.
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SECRET_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Mask all but the last four characters of a credential.
pub fn mask_value(value: &str) -> String {
    let count = value.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

/// Value as shown in text output for `key`.
pub fn display_value(key: &str, value: &str) -> String {
    if is_secret_key(key) && !value.is_empty() {
        mask_value(value)
    } else {
        value.to_string()
    }
}

//! CLI presentation: text and json formatters per command family.

mod config;
mod deploys;
mod provider;
mod shared;

pub use config::{format_config_show_json, format_config_show_text};
pub use deploys::{format_deploys_json, format_deploys_text};
pub use provider::{
    format_fields_json, format_fields_text, format_provider_list_json, format_provider_list_text,
};

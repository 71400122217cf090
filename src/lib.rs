//! Watch Dashboard: deploy status from pluggable provider executables
//!
//! Providers are executables in a providers directory that answer `name`,
//! `config` and `list`. The dashboard discovers them, negotiates their
//! configuration schema, injects stored values as `DEPLOY_WATCH_*`
//! environment variables, and renders the deploy records they print.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod elapsed;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod process;
pub mod provider;
pub mod store;

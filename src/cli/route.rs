//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_config_show_json, format_config_show_text, format_deploys_json, format_deploys_text,
    format_fields_json, format_fields_text, format_provider_list_json, format_provider_list_text,
};
use crate::config::DashboardConfig;
use crate::diagnostics::TracingSink;
use crate::elapsed::now_epoch;
use crate::error::ApiError;
use crate::process::run_with_timeout;
use crate::provider::commands::ProviderCommandService;
use crate::provider::{default_providers_dir, ConfigField, ProviderRegistry};
use crate::store::{ConfigStore, JsonFileStore};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// Timeout for locating the project root through git.
const GIT_ROOT_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime context for CLI execution: project directory, Config Store and provider registry.
pub struct RunContext {
    project_dir: PathBuf,
    store: JsonFileStore,
    registry: ProviderRegistry,
}

impl RunContext {
    /// Build the context for `project_dir`.
    ///
    /// The providers directory is `providers_dir` if given, else the settings
    /// value, else the per-user default.
    pub fn new(
        project_dir: PathBuf,
        providers_dir: Option<PathBuf>,
        settings: &DashboardConfig,
    ) -> Self {
        let providers_dir = providers_dir
            .or_else(|| settings.providers_dir.clone())
            .unwrap_or_else(default_providers_dir);
        let registry = ProviderRegistry::new(providers_dir)
            .with_timeouts(settings.timeouts.provider_timeouts());
        Self::from_parts(project_dir, registry)
    }

    /// Build the context from an already configured registry.
    pub fn from_parts(project_dir: PathBuf, registry: ProviderRegistry) -> Self {
        Self {
            store: JsonFileStore::for_project(&project_dir).with_sink(registry.sink()),
            project_dir,
            registry,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        tracing::info!(
            command = %name,
            project_dir = %self.project_dir.display(),
            "Command started"
        );
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(command = %name, duration_ms, "Command finished"),
            Err(e) => tracing::warn!(command = %name, duration_ms, "Command failed: {}", e),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Providers { format } => {
                let result = ProviderCommandService::list(&self.registry, &self.store);
                if format == "json" {
                    format_provider_list_json(&result)
                } else {
                    Ok(format_provider_list_text(&result))
                }
            }
            Commands::Fields { provider, format } => {
                let result = ProviderCommandService::fields(&self.registry, &self.store, provider)?;
                if format == "json" {
                    format_fields_json(&result)
                } else {
                    Ok(format_fields_text(&result))
                }
            }
            Commands::Deploys { format } => {
                let result = ProviderCommandService::deploys(&self.registry, &self.store)?;
                let now = now_epoch();
                if format == "json" {
                    format_deploys_json(&result, now)
                } else {
                    Ok(format_deploys_text(&result, now))
                }
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Show { format } => {
                let config = self.store.read();
                if format == "json" {
                    format_config_show_json(self.store.path(), &config)
                } else {
                    Ok(format_config_show_text(self.store.path(), &config))
                }
            }
            ConfigCommands::Use { provider } => {
                ProviderCommandService::use_provider(&self.registry, &self.store, provider)?;
                Ok(format!(
                    "Using provider: {} ({})",
                    provider,
                    self.registry.display_name(provider)
                ))
            }
            ConfigCommands::Set {
                key,
                value,
                provider,
            } => {
                let provider = ProviderCommandService::set_field(
                    &self.registry,
                    &self.store,
                    provider.as_deref(),
                    key,
                    value,
                )?;
                Ok(format!("Set {}.{}", provider, key))
            }
            ConfigCommands::Unset { key, provider } => {
                let (provider, removed) =
                    ProviderCommandService::unset_field(&self.store, provider.as_deref(), key)?;
                if removed {
                    Ok(format!("Removed {}.{}", provider, key))
                } else {
                    Ok(format!("{}.{} was not set", provider, key))
                }
            }
            ConfigCommands::Setup { provider } => self.handle_setup(provider.as_deref()),
            ConfigCommands::Reset => {
                let existed = self.store.path().exists();
                self.store.remove()?;
                if existed {
                    Ok(format!("Removed {}", self.store.path().display()))
                } else {
                    Ok("Nothing to reset".to_string())
                }
            }
        }
    }

    fn handle_setup(&self, provider: Option<&str>) -> Result<String, ApiError> {
        let config = self.store.read();
        let provider = ProviderCommandService::target_provider(&config, provider)?;
        if !self.registry.contains(&provider) {
            return Err(ApiError::UnknownProvider(provider));
        }

        let fields = self.registry.config_fields(&provider);
        if fields.is_empty() {
            return Ok(format!(
                "Provider {} declares no configuration fields",
                provider
            ));
        }

        let mut answers = Vec::with_capacity(fields.len());
        for field in &fields {
            let initial = ProviderCommandService::initial_value(&config, &provider, field);
            answers.push((field.key.clone(), prompt_field(field, initial)?));
        }
        ProviderCommandService::apply_setup(&self.store, &provider, &answers)?;
        Ok(format!(
            "Saved {} field(s) for {} to {}",
            answers.len(),
            provider,
            self.store.path().display()
        ))
    }
}

fn prompt_field(field: &ConfigField, initial: String) -> Result<String, ApiError> {
    use dialoguer::Input;

    let required = field.required;
    let mut input = Input::<String>::new()
        .with_prompt(field.display_label())
        .allow_empty(!required)
        .validate_with(move |value: &String| -> Result<(), &'static str> {
            if required && value.trim().is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        });
    if !initial.is_empty() {
        input = input.default(initial);
    }
    input
        .interact_text()
        .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))
}

/// The project directory: `explicit` if given, else the git top-level of the
/// current directory, else the current directory.
pub fn resolve_project_dir(explicit: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(root) = git_toplevel() {
        return Ok(root);
    }
    Ok(std::env::current_dir()?)
}

fn git_toplevel() -> Option<PathBuf> {
    let mut command = Command::new("git");
    command.args(["rev-parse", "--show-toplevel"]);
    match run_with_timeout(&mut command, GIT_ROOT_TIMEOUT, &TracingSink) {
        Ok(output) if output.success() => {
            let root = output.stdout.trim();
            if root.is_empty() {
                None
            } else {
                Some(PathBuf::from(root))
            }
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("git root lookup failed: {}", e);
            None
        }
    }
}

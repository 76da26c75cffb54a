//! Configuration loader for slack-notifier
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "SLACK_NOTIFIER_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "SLACK_NOTIFIER_CONFIG_FILE";

/// Conventional variable consulted when no webhook URL is configured
pub const WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SLACK_NOTIFIER";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base configuration
/// 2. `{environment}.toml` - Environment-specific configuration
/// 3. `local.toml` - Local overrides
/// 4. `SLACK_NOTIFIER_*` environment variables (highest priority)
///
/// Every file is optional in layered mode: all settings have defaults and the
/// webhook URL can arrive from the environment or the command line. A file
/// named explicitly (single-file mode) must exist.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`SLACK_NOTIFIER_CONFIG_DIR`)
    /// - Specific configuration file (`SLACK_NOTIFIER_CONFIG_FILE`)
    /// - Application environment (`SLACK_NOTIFIER_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `SLACK_NOTIFIER_CONFIG_DIR` and
    /// `SLACK_NOTIFIER_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                 Use {CONFIG_DIR_ENV} for layered configuration or \
                 {CONFIG_FILE_ENV} for a single configuration file."
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader that reads exactly one file, ignoring the configuration directory
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Replace the environment used to pick the overlay file
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the single configuration file does not exist
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        if settings.slack.webhook_url.is_empty()
            && let Ok(url) = std::env::var(WEBHOOK_URL_ENV)
        {
            settings.slack.webhook_url = url;
        }

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // Environment variables always win over files:
        // SLACK_NOTIFIER_SLACK__WEBHOOK_URL -> slack.webhook_url
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Files `load` reads, lowest priority first
    ///
    /// Missing layered files are left out. Runs before any subscriber is
    /// installed, so callers log the result once logging is up.
    pub fn sources(&self) -> Vec<PathBuf> {
        match &self.config_file {
            Some(config_file) => vec![config_file.clone()],
            None => self
                .layer_paths()
                .into_iter()
                .filter(|path| path.exists())
                .collect(),
        }
    }

    fn layer_paths(&self) -> [PathBuf; 3] {
        [
            self.config_dir.join("default.toml"),
            self.config_dir.join(self.environment.overlay_file_name()),
            self.config_dir.join("local.toml"),
        ]
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        self.layer_paths()
            .iter()
            .try_fold(builder, |builder, path| Self::add_file_source(builder, path, false))
    }

    /// Add a file source to the config builder
    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!(
                "Configuration path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    /// Add environment variable source to the config builder
    ///
    /// Double underscores (`__`) separate nested keys:
    /// - `SLACK_NOTIFIER_SLACK__CHANNEL` -> `slack.channel`
    /// - `SLACK_NOTIFIER_LOGGER__LEVEL` -> `logger.level`
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

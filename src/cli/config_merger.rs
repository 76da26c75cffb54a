//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use std::path::PathBuf;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, settings::Settings};

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments override every file and environment value.
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
    sources: Vec<PathBuf>,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self {
            base_config,
            environment: Environment::default(),
            sources: Vec::new(),
        }
    }

    /// Load the base configuration the way the global CLI flags ask for
    ///
    /// `--config` switches to single-file mode; `--env` replaces the
    /// environment detected from `SLACK_NOTIFIER_APP_ENV`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::with_file(path),
            None => ConfigLoader::new()?,
        };

        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self {
            base_config: loader.load()?,
            environment: loader.environment(),
            sources: loader.sources(),
        })
    }

    /// Report where the base configuration came from
    ///
    /// Loading happens before the logger exists, so this is called once it
    /// has been initialized.
    pub fn log_sources(&self) {
        tracing::debug!(
            environment = %self.environment,
            files = self.sources.len(),
            "Configuration loaded"
        );
        for path in &self.sources {
            tracing::trace!(path = %path.display(), "Configuration file applied");
        }
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied and validated
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);
        self.apply_command_overrides(&mut config, &cli.command);

        config.validate()?;

        Ok(config)
    }

    /// Apply global CLI argument overrides
    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    /// Apply command-specific CLI argument overrides
    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Send {
                webhook_url,
                channel,
                username,
                icon_emoji,
                timeout,
                log_level,
                ..
            } => {
                let slack = &mut config.slack;

                if let Some(url) = webhook_url {
                    slack.webhook_url = url.clone();
                }
                if let Some(channel) = channel {
                    slack.channel = Some(channel.clone());
                }
                if let Some(username) = username {
                    slack.username = Some(username.clone());
                }
                if let Some(icon_emoji) = icon_emoji {
                    slack.icon_emoji = Some(icon_emoji.clone());
                }
                if let Some(secs) = timeout {
                    slack.timeout_seconds = *secs;
                }

                // Command-specific level takes precedence over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Check => {}
        }
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }

    /// Files the base configuration was read from, lowest priority first
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use crate::config::test_env::{self, EnvGuard};
    use clap::Parser;

    const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.slack.webhook_url = WEBHOOK.to_string();
        config.slack.username = Some("file-bot".to_string());
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = create_valid_base_config();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_merge_verbose_flag() {
        let merged = merge(&["slack-notifier", "--verbose", "check"]).unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let merged = merge(&["slack-notifier", "--quiet", "check"]).unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_merge_send_overrides() {
        let merged = merge(&[
            "slack-notifier",
            "send",
            "--webhook-url",
            "https://hooks.slack.com/services/T000/B000/OTHER",
            "--channel",
            "#ops",
            "--icon-emoji",
            ":ghost:",
            "--timeout",
            "7",
            "hi",
        ])
        .unwrap();

        assert_eq!(
            merged.slack.webhook_url,
            "https://hooks.slack.com/services/T000/B000/OTHER"
        );
        assert_eq!(merged.slack.channel.as_deref(), Some("#ops"));
        assert_eq!(merged.slack.icon_emoji.as_deref(), Some(":ghost:"));
        assert_eq!(merged.slack.timeout_seconds, 7);
        // Untouched values come from the base configuration
        assert_eq!(merged.slack.username.as_deref(), Some("file-bot"));
    }

    #[test]
    fn test_merge_command_log_level_overrides_global() {
        let merged = merge(&["slack-notifier", "--verbose", "send", "--log-level", "warn", "hi"])
            .unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merge_rejects_invalid_override() {
        let result = merge(&["slack-notifier", "send", "--icon-emoji", "ghost", "hi"]);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "slack.icon_emoji"
        ));
    }

    #[test]
    fn test_merge_rejects_invalid_webhook_url() {
        let result = merge(&["slack-notifier", "send", "--webhook-url", "not a url", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cli_single_file() {
        let _lock = test_env::lock();
        let mut env = EnvGuard::clean();
        env.set("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T000/B000/FALLBACK");

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notifier.toml");
        std::fs::write(
            &path,
            format!("[slack]\nwebhook_url = \"{WEBHOOK}\"\nchannel = \"#from-file\"\n"),
        )
        .unwrap();

        let cli =
            Cli::try_parse_from(["slack-notifier", "--config", path.to_str().unwrap(), "check"])
                .unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();

        assert_eq!(merger.config().slack.channel.as_deref(), Some("#from-file"));
        assert_eq!(merger.sources(), [path.clone()]);
        assert_eq!(merger.config().slack.webhook_url, WEBHOOK);
    }
}

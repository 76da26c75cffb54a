//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Send messages to Slack through an incoming webhook
#[derive(Parser, Debug)]
#[command(name = "slack-notifier")]
#[command(about = "Send messages to Slack through an incoming webhook")]
#[command(long_about = "
slack-notifier posts plain text messages to a Slack incoming webhook.
The webhook URL and delivery options are read from layered configuration
files, SLACK_NOTIFIER_* environment variables and command-line flags.

EXAMPLES:
    # Send a message using the configured webhook
    slack-notifier send \"Hello from ai-coding-utils\"

    # Send to an explicit webhook with a bold title
    slack-notifier send --webhook-url https://hooks.slack.com/services/T000/B000/XXXX \\
        --title Deploy \"api v2 is live\"

    # Show the payload without sending it
    slack-notifier send --dry-run \"testing\"

    # Use a custom configuration file
    slack-notifier --config /etc/slack-notifier/production.toml send \"nightly ok\"

    # Check the merged configuration
    slack-notifier --env production check

If no webhook URL is configured, SLACK_WEBHOOK_URL is used.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Read settings from this single TOML file instead of the layered
    /// configuration directory. The file must exist and be readable.
    ///
    /// Example: --config /etc/slack-notifier/production.toml
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded on top of
    /// `default.toml`. Takes precedence over SLACK_NOTIFIER_APP_ENV.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level.
    /// Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only.
    /// Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a message to the configured webhook
    ///
    /// Issues exactly one POST request. The exit status is non-zero when
    /// Slack does not accept the message.
    ///
    /// Examples:
    ///   slack-notifier send "Build green"                  # Plain text
    ///   slack-notifier send --title CI "Build green"       # Bold title line
    ///   slack-notifier send --channel "#ops" "Disk full"   # Legacy channel override
    Send {
        /// Message text
        #[arg(value_name = "MESSAGE", value_parser = super::validation::validate_message)]
        message: String,

        /// Webhook URL, overriding every configured value
        #[arg(long, value_name = "URL")]
        webhook_url: Option<String>,

        /// Channel override, e.g. #alerts
        #[arg(long, value_name = "CHANNEL")]
        channel: Option<String>,

        /// Display name override
        #[arg(long, value_name = "NAME")]
        username: Option<String>,

        /// Emoji avatar override, e.g. :robot_face:
        #[arg(long, value_name = "EMOJI")]
        icon_emoji: Option<String>,

        /// Request timeout in seconds
        #[arg(long, value_name = "SECS", value_parser = super::validation::validate_timeout_seconds)]
        timeout: Option<u64>,

        /// Title rendered in bold above the message
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Print the payload and destination without sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and print a summary
    ///
    /// Fails when no webhook URL is configured. The secret part of the
    /// webhook URL is never printed.
    Check,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Commands::Send {
            title: Some(title),
            ..
        } = &self.command
            && title.trim().is_empty()
        {
            return Err("--title cannot be blank".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["slack-notifier", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["slack-notifier", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["slack-notifier"]).is_err());
    }

    #[test]
    fn test_send_command_minimal() {
        let cli = Cli::try_parse_from(["slack-notifier", "send", "Hello from ai-coding-utils"])
            .unwrap();
        match cli.command {
            Commands::Send {
                message,
                webhook_url,
                title,
                dry_run,
                ..
            } => {
                assert_eq!(message, "Hello from ai-coding-utils");
                assert!(webhook_url.is_none());
                assert!(title.is_none());
                assert!(!dry_run);
            }
            other => panic!("Expected Send command, got {other:?}"),
        }
    }

    #[test]
    fn test_send_command_all_options() {
        let cli = Cli::try_parse_from([
            "slack-notifier",
            "send",
            "--webhook-url",
            "https://hooks.slack.com/services/T000/B000/XXXX",
            "--channel",
            "#alerts",
            "--username",
            "ci-bot",
            "--icon-emoji",
            ":robot_face:",
            "--timeout",
            "5",
            "--title",
            "Deploy",
            "--log-level",
            "debug",
            "--dry-run",
            "api v2 is live",
        ])
        .unwrap();

        match cli.command {
            Commands::Send {
                message,
                webhook_url,
                channel,
                username,
                icon_emoji,
                timeout,
                title,
                log_level,
                dry_run,
            } => {
                assert_eq!(message, "api v2 is live");
                assert_eq!(
                    webhook_url.as_deref(),
                    Some("https://hooks.slack.com/services/T000/B000/XXXX")
                );
                assert_eq!(channel.as_deref(), Some("#alerts"));
                assert_eq!(username.as_deref(), Some("ci-bot"));
                assert_eq!(icon_emoji.as_deref(), Some(":robot_face:"));
                assert_eq!(timeout, Some(5));
                assert_eq!(title.as_deref(), Some("Deploy"));
                assert!(matches!(log_level, Some(LogLevel::Debug)));
                assert!(dry_run);
            }
            other => panic!("Expected Send command, got {other:?}"),
        }
    }

    #[test]
    fn test_send_rejects_blank_message_and_zero_timeout() {
        assert!(Cli::try_parse_from(["slack-notifier", "send", "  "]).is_err());
        assert!(Cli::try_parse_from(["slack-notifier", "send", "--timeout", "0", "hi"]).is_err());
    }

    #[test]
    fn test_check_command_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from(["slack-notifier", "check", "--env", "prod", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
        assert!(matches!(cli.env, Some(Environment::Production)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["slack-notifier", "--verbose", "--quiet", "check"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let cli = Cli::try_parse_from(["slack-notifier", "send", "--title", " ", "body"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_environment_conversion() {
        let env: crate::config::Environment = Environment::Staging.into();
        assert_eq!(env, crate::config::Environment::Staging);
        assert_eq!(String::from(LogLevel::Warn), "warn");
    }
}

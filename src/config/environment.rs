//! Deployment environment selection
//!
//! The environment decides which `{environment}.toml` overlay the loader
//! reads on top of `default.toml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Deployment environment the notifier runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Variable consulted by [`Environment::from_env`]
    pub const ENV_VAR: &'static str = "SLACK_NOTIFIER_APP_ENV";

    /// Every variant, in the order they are listed in error messages
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Reads `SLACK_NOTIFIER_APP_ENV`, falling back to `Development` when it
    /// is unset or unparseable.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Name of the overlay file for this environment, e.g. `production.toml`
    pub fn overlay_file_name(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => {
                let valid: Vec<&str> = Self::ALL.iter().map(Environment::as_str).collect();
                Err(ConfigError::EnvVarError(format!(
                    "Invalid environment '{}'. Valid values are: {}",
                    s,
                    valid.join(", ")
                )))
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_aliases() {
        let cases = [
            ("development", Environment::Development),
            ("dev", Environment::Development),
            ("test", Environment::Test),
            ("stage", Environment::Staging),
            ("prod", Environment::Production),
            (" Production ", Environment::Production),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_environment_invalid_lists_valid_values() {
        let err = "qa".parse::<Environment>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid environment 'qa'"));
        assert!(msg.contains("development, test, staging, production"));
    }

    #[test]
    fn test_overlay_file_name() {
        assert_eq!(Environment::Staging.overlay_file_name(), "staging.toml");
        assert_eq!(Environment::default().overlay_file_name(), "development.toml");
    }
}

//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Longest request timeout accepted on the command line
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate timeout is a whole number of seconds between 1 and 300
pub fn validate_timeout_seconds(secs_str: &str) -> Result<u64, String> {
    let secs: u64 = secs_str.parse().map_err(|_| {
        format!(
            "Timeout must be a whole number of seconds, got: '{}'",
            secs_str
        )
    })?;

    if secs == 0 {
        return Err("Timeout must be greater than 0 seconds".to_string());
    }

    if secs > MAX_TIMEOUT_SECONDS {
        return Err(format!(
            "Timeout cannot exceed {} seconds",
            MAX_TIMEOUT_SECONDS
        ));
    }

    Ok(secs)
}

/// Validate the message contains something other than whitespace
pub fn validate_message(message: &str) -> Result<String, String> {
    if message.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    Ok(message.to_string())
}

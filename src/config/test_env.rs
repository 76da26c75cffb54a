//! Serialises tests that read or write process environment variables.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::environment::Environment;
use crate::config::loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV, WEBHOOK_URL_ENV};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Variables the configuration loader reads
const MANAGED_VARS: &[&str] = &[
    CONFIG_DIR_ENV,
    CONFIG_FILE_ENV,
    WEBHOOK_URL_ENV,
    Environment::ENV_VAR,
    "SLACK_NOTIFIER_SLACK__WEBHOOK_URL",
    "SLACK_NOTIFIER_SLACK__CHANNEL",
    "SLACK_NOTIFIER_SLACK__TIMEOUT_SECONDS",
    "SLACK_NOTIFIER_LOGGER__LEVEL",
];

/// Held for the whole test by anything that touches the environment,
/// including tests that only call `ConfigLoader::load`
pub(crate) fn lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears every variable the loader reads and restores them on drop
pub(crate) struct EnvGuard {
    vars_to_restore: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub(crate) fn clean() -> Self {
        let mut guard = Self {
            vars_to_restore: Vec::new(),
        };
        for key in MANAGED_VARS {
            guard.remove(key);
        }
        guard
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        // SAFETY: callers hold `lock()`, so no other test touches the environment
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        // SAFETY: callers hold `lock()`
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original_value) in self.vars_to_restore.iter().rev() {
            // SAFETY: the guard is dropped before the lock it was created under
            unsafe {
                match original_value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

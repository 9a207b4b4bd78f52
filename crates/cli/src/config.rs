// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration.
//!
//! Resolved once at startup from, in increasing precedence:
//! built-in defaults, an optional `autograde.toml`, and environment
//! variables (`AUTOGRADE_TIMEOUT`, `AUTOGRADE_COMMAND`).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::discovery;
use crate::error::ConfigError;

/// Centralized default values.
pub mod defaults {
    /// Maximum wait on the test command, in seconds.
    pub const TIMEOUT_SECS: u64 = 300;

    /// Upper bound accepted for a configured timeout (one day).
    pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

    /// Runs only the integration test target.
    pub const COMMAND: &[&str] = &["cargo", "test", "--test", "all_tests"];

    /// Summary shown when the run completes within the timeout.
    pub const DISCLAIMER: &str = "The autograded score is not an official grade";

    /// Config file name searched for by discovery.
    pub const CONFIG_FILE: &str = "autograde.toml";
}

/// Environment variable names.
pub mod env {
    /// Explicit config file path (skips discovery).
    pub const CONFIG: &str = "AUTOGRADE_CONFIG";
    /// Timeout override in seconds.
    pub const TIMEOUT: &str = "AUTOGRADE_TIMEOUT";
    /// Command override, run through `sh -c`.
    pub const COMMAND: &str = "AUTOGRADE_COMMAND";
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program followed by its arguments.
    pub command: Vec<String>,
    /// Maximum wall-clock wait on the command.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: defaults::COMMAND.iter().map(|s| s.to_string()).collect(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Command as a single display string (for logs and errors).
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Override fields from environment-style lookups.
    ///
    /// Takes a lookup function so tests don't have to mutate the
    /// process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(env::TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: env::TIMEOUT,
                message: format!("{raw:?} is not a number of seconds ({e})"),
            })?;
            self.timeout = timeout_from_secs(env::TIMEOUT, secs)?;
        }

        if let Some(raw) = lookup(env::COMMAND) {
            if raw.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: env::COMMAND,
                    message: "command is empty".to_string(),
                });
            }
            self.command = vec!["sh".to_string(), "-c".to_string(), raw];
        }

        Ok(self)
    }
}

/// On-disk `autograde.toml` layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    runner: RunnerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunnerConfig {
    /// Program and arguments.
    command: Option<Vec<String>>,
    /// Timeout in seconds.
    timeout: Option<u64>,
}

/// Parse config file content on top of the defaults.
pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = Config::default();

    if let Some(command) = file.runner.command {
        if command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                key: "runner.command",
                message: "command must name a program".to_string(),
            });
        }
        config.command = command;
    }

    if let Some(secs) = file.runner.timeout {
        config.timeout = timeout_from_secs("runner.timeout", secs)?;
    }

    Ok(config)
}

/// Load a config file from disk.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Resolve the effective configuration for a run started in `cwd`.
pub fn resolve(cwd: &Path) -> Result<Config, ConfigError> {
    let explicit = std::env::var_os(env::CONFIG).map(|p| cwd.join(p));
    let path = explicit.or_else(|| discovery::find_config(cwd));

    let base = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load(&path)?
        }
        None => Config::default(),
    };

    base.with_overrides(|key| std::env::var(key).ok())
}

fn timeout_from_secs(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            message: "timeout must be at least one second".to_string(),
        });
    }
    if secs > defaults::MAX_TIMEOUT_SECS {
        return Err(ConfigError::Invalid {
            key,
            message: format!(
                "timeout must be at most {} seconds",
                defaults::MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

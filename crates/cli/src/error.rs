// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the fatal paths.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to run the test command.
#[derive(Debug, Error)]
pub enum RunError {
    /// The child process could not be started.
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child started but could not be waited on or killed.
    #[error("failed to supervise `{command}`: {source}")]
    Capture {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

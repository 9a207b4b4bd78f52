//! Test helpers for behavioral specifications.
//!
//! Provides a temp submission directory and a preconfigured command.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Returns a Command configured to run the autograde binary
pub fn autograde_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("autograde"));
    for var in ["AUTOGRADE_CONFIG", "AUTOGRADE_TIMEOUT", "AUTOGRADE_COMMAND", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A throwaway submission directory (bounded by its own `.git`).
pub struct Submission {
    dir: TempDir,
}

impl Submission {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the submission root.
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Write autograde.toml at the submission root.
    pub fn config(&self, content: &str) {
        self.file("autograde.toml", content);
    }

    /// Command running in this submission with a fake test runner.
    pub fn grade(&self, runner_script: &str) -> Command {
        let mut cmd = autograde_cmd();
        cmd.current_dir(self.path())
            .env("AUTOGRADE_COMMAND", runner_script);
        cmd
    }

    pub fn results_path(&self) -> PathBuf {
        self.dir.path().join("results/results.json")
    }

    /// Parse the written report.
    pub fn report(&self) -> Value {
        let content = std::fs::read_to_string(self.results_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

/// JSON Schema for the Gradescope results document.
pub fn report_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "required": ["output", "stdout_visibility", "tests"],
        "additionalProperties": false,
        "properties": {
            "output": { "type": "string" },
            "stdout_visibility": { "const": "visible" },
            "tests": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["score", "max_score", "name", "output"],
                    "additionalProperties": false,
                    "properties": {
                        "score": { "enum": [0, 1] },
                        "max_score": { "const": 1 },
                        "name": { "type": "string", "pattern": "^\\w+$" },
                        "output": { "type": "string" }
                    }
                }
            }
        }
    })
}

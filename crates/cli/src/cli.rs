// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

/// Runs the integration test target and writes a Gradescope report
#[derive(Debug, Parser)]
#[command(name = "autograde")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to write results.json (parent directories are created)
    #[arg(value_name = "RESULTS_PATH")]
    pub results_path: PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

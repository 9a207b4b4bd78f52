// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Autograder for cargo integration tests.
//!
//! Runs the integration test target, scans libtest's per-test lines,
//! and writes a Gradescope `results.json`.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parse;
pub mod report;
pub mod runner;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{ConfigError, RunError};
pub use parse::{TestResult, TestStatus, parse_line, parse_output};
pub use report::{GradeReport, ReportTest, build_report, persist};
pub use runner::{RunOutcome, run_tests};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gradescope report generation.
//!
//! Each detected test is worth one point with no partial credit. The
//! report is written as compact JSON to the path Gradescope expects.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::defaults::DISCLAIMER;
use crate::runner::RunOutcome;

/// Gradescope only shows stdout to students when this is "visible".
pub const STDOUT_VISIBILITY: &str = "visible";

/// Top-level `results.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    /// Summary shown above the per-test table.
    pub output: String,
    pub stdout_visibility: String,
    pub tests: Vec<ReportTest>,
}

/// One row in the per-test table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTest {
    pub score: u32,
    pub max_score: u32,
    pub name: String,
    /// Raw runner line for this test.
    pub output: String,
}

/// Build the report for a finished (or timed out) run.
pub fn build_report(outcome: &RunOutcome, timeout: Duration) -> GradeReport {
    let tests = outcome
        .results
        .iter()
        .map(|result| ReportTest {
            score: u32::from(result.pass),
            max_score: 1,
            name: result.name.clone(),
            output: result.output.clone(),
        })
        .collect();

    GradeReport {
        output: summary(outcome.timed_out, timeout),
        stdout_visibility: STDOUT_VISIBILITY.to_string(),
        tests,
    }
}

/// Summary message for the top of the report.
pub fn summary(timed_out: bool, timeout: Duration) -> String {
    if timed_out {
        format!(
            "Tests timed out after {} seconds; results may be incomplete. {DISCLAIMER}",
            timeout.as_secs()
        )
    } else {
        DISCLAIMER.to_string()
    }
}

impl GradeReport {
    pub fn score(&self) -> u32 {
        self.tests.iter().map(|t| t.score).sum()
    }

    pub fn max_score(&self) -> u32 {
        self.tests.iter().map(|t| t.max_score).sum()
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Write the report to `path`, creating parent directories if needed.
///
/// Overwrites any existing file.
pub fn persist(report: &GradeReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = report.to_json()?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Grade command: execute, parse, build, persist.

use std::io::Write;

use anyhow::Context;

use autograde::cli::Cli;
use autograde::config;
use autograde::report::{build_report, persist};
use autograde::runner::run_tests;

/// Run the full grading pipeline.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(&cwd)?;

    let outcome = run_tests(&config).context("no report written")?;

    // Echo the runner output so it shows up in the grader's stdout panel
    {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(outcome.output.as_bytes())?;
        handle.flush()?;
    }

    let report = build_report(&outcome, config.timeout);
    persist(&report, &cli.results_path)?;

    tracing::info!(
        tests = report.tests.len(),
        score = report.score(),
        max_score = report.max_score(),
        timed_out = outcome.timed_out,
        "wrote report to {}",
        cli.results_path.display()
    );
    Ok(())
}

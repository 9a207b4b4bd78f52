// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autograde::cli::Cli;

mod cmd_grade;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the echoed test output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    cmd_grade::run(&cli)
}

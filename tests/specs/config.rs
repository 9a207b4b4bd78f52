// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for runner configuration.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn config_file_sets_command() {
    let sub = Submission::new();
    sub.config(
        r#"
[runner]
command = ["sh", "-c", "echo 'test from_config ... ok'"]
"#,
    );

    autograde_cmd()
        .current_dir(sub.path())
        .arg(sub.results_path())
        .assert()
        .success();

    assert_eq!(sub.report()["tests"][0]["name"], "from_config");
}

#[test]
fn config_discovered_from_subdirectory() {
    let sub = Submission::new();
    sub.config(
        r#"
[runner]
command = ["sh", "-c", "echo 'test discovered ... ok'"]
"#,
    );
    sub.file("tests/input/.keep", "");

    autograde_cmd()
        .current_dir(sub.path().join("tests/input"))
        .arg(sub.results_path())
        .assert()
        .success();

    assert_eq!(sub.report()["tests"][0]["name"], "discovered");
}

#[test]
fn explicit_config_path() {
    let sub = Submission::new();
    sub.file(
        "grading/custom.toml",
        r#"
[runner]
command = ["sh", "-c", "echo 'test explicit ... ok'"]
"#,
    );

    autograde_cmd()
        .current_dir(sub.path())
        .env("AUTOGRADE_CONFIG", "grading/custom.toml")
        .arg(sub.results_path())
        .assert()
        .success();

    assert_eq!(sub.report()["tests"][0]["name"], "explicit");
}

#[test]
fn environment_command_overrides_config_file() {
    let sub = Submission::new();
    sub.config(
        r#"
[runner]
command = ["sh", "-c", "echo 'test from_file ... ok'"]
"#,
    );

    sub.grade("echo 'test from_env ... ok'")
        .arg(sub.results_path())
        .assert()
        .success();

    assert_eq!(sub.report()["tests"][0]["name"], "from_env");
}

#[test]
fn config_timeout_appears_in_summary() {
    let sub = Submission::new();
    sub.config(
        r#"
[runner]
command = ["sh", "-c", "sleep 30"]
timeout = 1
"#,
    );

    autograde_cmd()
        .current_dir(sub.path())
        .arg(sub.results_path())
        .assert()
        .success();

    let report = sub.report();
    assert!(report["output"].as_str().unwrap().contains("1 seconds"));
}

#[test]
fn unknown_config_field_fails() {
    let sub = Submission::new();
    sub.config("[runner]\nretries = 2\n");

    autograde_cmd()
        .current_dir(sub.path())
        .arg(sub.results_path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("autograde.toml"));

    assert!(!sub.results_path().exists());
}

#[test]
fn invalid_timeout_fails() {
    let sub = Submission::new();
    sub.grade("echo 'test a ... ok'")
        .env("AUTOGRADE_TIMEOUT", "soon")
        .arg(sub.results_path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("AUTOGRADE_TIMEOUT"));
}

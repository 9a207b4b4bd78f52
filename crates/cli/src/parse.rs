// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Libtest output parsing.
//!
//! Recognizes the human-readable per-test lines that `cargo test` prints:
//!
//! ```text
//! test add_numbers ... ok
//! test div_by_zero ... FAILED
//! test skipped_case ... ignored
//! ```
//!
//! Everything else (compiler output, `running N tests`, the summary line)
//! is skipped.

use std::sync::LazyLock;

use regex::Regex;

/// Start-anchored: the identifier must be a bare `\w+` token, so
/// module-qualified names (`a::b`) are not matched.
#[allow(clippy::expect_used)]
static TEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^test (\w+) ... (ok|FAILED|ignored)").expect("valid regex")
});

/// Status token reported by libtest for a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Ok,
    Failed,
    Ignored,
}

impl TestStatus {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "ok" => Some(Self::Ok),
            "FAILED" => Some(Self::Failed),
            "ignored" => Some(Self::Ignored),
            _ => None,
        }
    }

    /// Only `ok` counts as a pass. Ignored tests score the same as failures.
    pub fn is_pass(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// A single recognized test line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Test function name.
    pub name: String,
    /// Whether the test passed.
    pub pass: bool,
    /// The source line, trailing whitespace removed.
    pub output: String,
}

/// Classify one line of runner output.
pub fn parse_line(line: &str) -> Option<TestResult> {
    let caps = TEST_LINE.captures(line)?;
    let status = TestStatus::from_token(caps.get(2)?.as_str())?;
    Some(TestResult {
        name: caps.get(1)?.as_str().to_string(),
        pass: status.is_pass(),
        output: line.trim_end().to_string(),
    })
}

/// Scan captured output, returning results in the order they appear.
///
/// Lines break on any Unicode line boundary, not just `\n`, so a test
/// binary that emits bare `\r` still yields one result per line.
pub fn parse_output(text: &str) -> Vec<TestResult> {
    text.split(is_line_break).filter_map(parse_line).collect()
}

/// Newlines, carriage returns, and the other Unicode line separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

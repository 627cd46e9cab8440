//! # CLI Integration Tests / CLI 集成测试
//!
//! End-to-end tests of the `matrix-validator` binary: exit codes, filter
//! arguments, demo-mode synthesis, report generation and the init scaffold.
//!
//! `matrix-validator` 二进制文件的端到端测试：退出码、过滤参数、
//! 演示模式合成、报告生成以及 init 脚手架。

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

use common::{blocked_matrix, failing_matrix, passing_matrix, write_matrix};

fn validator() -> Command {
    let mut cmd = Command::cargo_bin("matrix-validator").unwrap();
    cmd.arg("--lang").arg("en");
    cmd
}

/// A run whose cases all pass exits with code 0.
#[test]
fn test_all_passing_run_exits_zero() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", passing_matrix());

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CASES PASSED"));
}

/// Any FAIL in the run drives exit code 2 and a failure detail section.
#[test]
fn test_failing_run_exits_two() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", failing_matrix());

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("VALIDATION DEFECTS DETECTED"))
        .stdout(predicate::str::contains("order number"));
}

/// A case without a recorded response is BLOCKED, which also means exit 2.
#[test]
fn test_blocked_run_exits_two() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", blocked_matrix());

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("BLOCKED: 1"));
}

/// Demo-mode synthesis fills the missing response, so the same matrix passes.
#[test]
fn test_synthetic_actual_unblocks_the_run() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", blocked_matrix());

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .arg("--use-synthetic-actual")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEMO mode"))
        .stdout(predicate::str::contains("ALL CASES PASSED"));
}

/// A missing matrix file is a runtime error: exit 1, nothing validated.
#[test]
fn test_missing_matrix_exits_one() {
    validator()
        .arg("run")
        .arg("--matrix")
        .arg("definitely/not/there.toml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load case matrix"));
}

/// Unparseable matrix content is also a runtime error.
#[test]
fn test_invalid_matrix_schema_exits_one() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(
        &temp_dir,
        "CaseMatrix.toml",
        r#"
language = "en"

[[cases]]
id = "TC-001"
description = "Missing scenario, component and priority"
"#,
    );

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .assert()
        .code(1);
}

/// Filters narrow the run; a filter matching nothing is a clean exit 0.
#[test]
fn test_priority_filter_excludes_the_failing_case() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", failing_matrix());

    // Only the passing High-priority case survives the filter.
    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .arg("--priority")
        .arg("High")
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CASES PASSED"));

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .arg("--component")
        .arg("NoSuchComponent")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cases match"));
}

/// The failure limit stops the run early but keeps the true total visible.
#[test]
fn test_max_failures_stops_early() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(
        &temp_dir,
        "CaseMatrix.toml",
        r#"
language = "en"

[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "First failing case"
priority = "High"
expected = "CONTAINS: never present"
actual = "some reply"

[[cases]]
id = "TC-002"
scenario = "SC-001"
component = "Chatbot"
description = "Second failing case"
priority = "High"
expected = "CONTAINS: never present"
actual = "some reply"

[[cases]]
id = "TC-003"
scenario = "SC-001"
component = "Chatbot"
description = "Would pass, but never runs"
priority = "High"
expected = "NOT_EMPTY"
actual = "some reply"
"#,
    );

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .arg("--max-failures")
        .arg("1")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Total: 3"))
        .stdout(predicate::str::contains("Stopped early"));
}

/// Both report files are written where the arguments point.
#[test]
fn test_reports_are_written() {
    let temp_dir = tempdir().unwrap();
    let matrix_path = write_matrix(&temp_dir, "CaseMatrix.toml", failing_matrix());
    let junit_path = temp_dir.path().join("reports").join("junit.xml");
    let md_path = temp_dir.path().join("reports").join("report.md");

    validator()
        .arg("run")
        .arg("--matrix")
        .arg(&matrix_path)
        .arg("--junit-report")
        .arg(&junit_path)
        .arg("--md-report")
        .arg(&md_path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("JUnit XML report written to"))
        .stdout(predicate::str::contains("Markdown report written to"));

    let xml = std::fs::read_to_string(&junit_path).unwrap();
    assert!(xml.contains("<testsuite"));
    assert!(xml.contains("<failure"));

    let md = std::fs::read_to_string(&md_path).unwrap();
    assert!(md.contains("# Validation Report"));
    assert!(md.contains("## Failures"));
}

/// `init --non-interactive` scaffolds a matrix the `run` command accepts.
#[test]
fn test_init_scaffold_then_run() {
    let temp_dir = tempdir().unwrap();

    validator()
        .arg("init")
        .arg("--non-interactive")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created CaseMatrix.toml"));

    assert!(temp_dir.path().join("CaseMatrix.toml").exists());

    validator()
        .arg("run")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CASES PASSED"));
}

//! # Markdown Reporting Module / Markdown 报告模块
//!
//! This module handles the generation of human-readable Markdown reports:
//! a timestamped summary, a table of the first cases, and a detail section
//! per failed case.
//!
//! 此模块处理人类可读的 Markdown 报告的生成：
//! 带时间戳的摘要、最前面若干用例的表格，以及每个失败用例的详情部分。

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::core::models::{ExecutionResult, RunSummary};
use crate::infra::fs::ensure_parent_dir;

/// Maximum number of rows in the case table; the failure sections below the
/// table still cover every failed case.
/// 用例表格中的最大行数；表格下方的失败部分仍覆盖每个失败用例。
const MAX_TABLE_ROWS: usize = 20;

/// Maximum length of the notes column before truncation.
const MAX_NOTES_LEN: usize = 50;

/// Generates a Markdown report from the ordered result collection and the
/// run summary. Creates parent directories of the output path as needed.
///
/// 从有序的结果集合和运行摘要生成 Markdown 报告。
/// 根据需要创建输出路径的父目录。
pub fn generate_markdown_report(
    results: &[ExecutionResult],
    summary: &RunSummary,
    output_path: &Path,
) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Validation Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**Generated:** {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());

    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- **Total:** {}", summary.total));
    lines.push(format!("- **PASS:** {}", summary.passed));
    lines.push(format!("- **FAIL:** {}", summary.failed));
    lines.push(format!("- **BLOCKED:** {}", summary.blocked));
    if summary.stopped_early {
        lines.push(format!(
            "- **Not run:** {} (stopped early at the failure limit)",
            summary.total - summary.executed()
        ));
    }
    lines.push(String::new());

    if !results.is_empty() {
        lines.push("## Cases".to_string());
        lines.push(String::new());
        lines.push("| ID | Status | Component | Notes |".to_string());
        lines.push("|----|--------|-----------|-------|".to_string());

        for result in results.iter().take(MAX_TABLE_ROWS) {
            let notes = if result.details.is_empty() {
                "-".to_string()
            } else {
                truncate(&result.details, MAX_NOTES_LEN)
            };
            lines.push(format!(
                "| {} | {} | {} | {} |",
                escape_pipes(&result.case_id),
                result.status,
                escape_pipes(&result.component),
                escape_pipes(&notes),
            ));
        }

        if results.len() > MAX_TABLE_ROWS {
            lines.push(String::new());
            lines.push(format!(
                "*Showing first {} of {} cases*",
                MAX_TABLE_ROWS,
                results.len()
            ));
        }
        lines.push(String::new());
    }

    let failures: Vec<&ExecutionResult> = results.iter().filter(|r| r.is_failure()).collect();
    if !failures.is_empty() {
        lines.push("## Failures".to_string());
        lines.push(String::new());

        for result in failures {
            lines.push(format!("### {}", result.case_id));
            lines.push(String::new());

            if !result.failure_reasons.is_empty() {
                lines.push("**Failure Reasons:**".to_string());
                lines.push(String::new());
                for reason in &result.failure_reasons {
                    lines.push(format!("- {}", reason));
                }
                lines.push(String::new());
            }

            if !result.applied_rules.is_empty() {
                lines.push("**Applied Rules:**".to_string());
                lines.push(String::new());
                lines.push(result.applied_rules.join(", "));
                lines.push(String::new());
            }

            if !result.details.is_empty() {
                lines.push("**Details:**".to_string());
                lines.push(String::new());
                lines.push(result.details.clone());
                lines.push(String::new());
            }

            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    ensure_parent_dir(output_path)?;
    fs::write(output_path, lines.join("\n"))?;
    Ok(())
}

/// Truncates a table cell, marking the cut with an ellipsis.
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut)
}

/// Escapes pipe characters so cell content cannot break the table layout.
/// 转义管道字符，使单元格内容不会破坏表格布局。
fn escape_pipes(input: &str) -> String {
    input.replace('|', "\\|")
}

//! # JUnit Reporting Module / JUnit 报告模块
//!
//! This module handles the generation of JUnit XML reports so CI systems can
//! ingest a validation run like any other test suite. FAIL cases become
//! `<failure>` elements, BLOCKED cases become `<skipped>` elements.
//!
//! 此模块处理 JUnit XML 报告的生成，使 CI 系统可以像处理任何其他测试套件一样
//! 处理一次验证运行。FAIL 用例成为 `<failure>` 元素，
//! BLOCKED 用例成为 `<skipped>` 元素。

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::models::{ExecutionResult, ExecutionStatus};
use crate::infra::fs::ensure_parent_dir;

/// The testsuite and classname attribute used in the generated XML.
/// 生成的 XML 中使用的 testsuite 和 classname 属性。
const SUITE_NAME: &str = "Conversational AI QA Matrix";

/// Generates a JUnit XML report from the ordered result collection.
/// Creates parent directories of the output path as needed.
///
/// 从有序的结果集合生成 JUnit XML 报告。
/// 根据需要创建输出路径的父目录。
///
/// # Errors / 错误
/// This function will return an error if:
/// - The output directory cannot be created
/// - The output file cannot be written to the specified path
///
/// 此函数在以下情况下会返回错误：
/// - 无法创建输出目录
/// - 无法将输出文件写入指定路径
pub fn generate_junit_report(results: &[ExecutionResult], output_path: &Path) -> Result<()> {
    let failures = results.iter().filter(|r| r.is_failure()).count();
    let skipped = results.iter().filter(|r| r.is_blocked()).count();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str(&format!(
        "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" skipped=\"{}\" errors=\"0\">\n",
        escape_xml(SUITE_NAME),
        results.len(),
        failures,
        skipped,
    ));

    for result in results {
        xml.push_str(&format!(
            "  <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\"",
            escape_xml(&result.case_id),
            escape_xml(SUITE_NAME),
            result.duration.as_secs_f64(),
        ));

        match result.status {
            ExecutionStatus::Pass => {
                xml.push_str(" />\n");
            }
            ExecutionStatus::Fail => {
                xml.push_str(">\n");
                xml.push_str(&format!(
                    "    <failure message=\"{}\">{}</failure>\n",
                    escape_xml(&result.details),
                    escape_xml(&failure_body(result)),
                ));
                xml.push_str("  </testcase>\n");
            }
            ExecutionStatus::Blocked => {
                xml.push_str(">\n");
                xml.push_str(&format!(
                    "    <skipped message=\"{}\">{}</skipped>\n",
                    escape_xml(&result.details),
                    escape_xml(&result.details),
                ));
                xml.push_str("  </testcase>\n");
            }
        }
    }

    xml.push_str("</testsuite>\n");

    ensure_parent_dir(output_path)?;
    fs::write(output_path, xml)?;
    Ok(())
}

/// Joins the failure reasons and the disposition summary into the element
/// body, one line each.
fn failure_body(result: &ExecutionResult) -> String {
    let mut parts: Vec<&str> = result.failure_reasons.iter().map(String::as_str).collect();
    if !result.details.is_empty() {
        parts.push(&result.details);
    }
    if parts.is_empty() {
        return "Case failed".to_string();
    }
    parts.join("\n")
}

/// Simple XML escape function to replace special characters with their XML entities
/// 简单的 XML 转义函数，用 XML 实体替换特殊字符
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

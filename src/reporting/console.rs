//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the display of validation results in the console.
//! It provides functionality for printing colorful, formatted summaries with
//! internationalization support.
//!
//! 此模块处理控制台中验证结果的显示。
//! 它提供打印彩色格式化摘要的功能，支持国际化。

use colored::*;

use crate::core::models::{ExecutionResult, ExecutionStatus, RunSummary};
use crate::infra::t;

/// Prints a formatted summary of the validation run to the console.
/// Displays one row per executed case with status, id and duration, followed
/// by the run totals, using color coding to highlight the statuses.
///
/// 在控制台打印本次验证运行的格式化摘要。
/// 每个已执行用例显示一行，包含状态、id 和持续时间，随后是运行总计，
/// 使用颜色编码突出显示状态。
///
/// # Output Format / 输出格式
/// ```text
/// --- Validation Summary ---
///   - PASS     | TC-001                          |   102.00µs
///   - FAIL     | TC-002                          |    98.00µs
///   - BLOCKED  | TC-003                          |     1.00µs
/// ```
pub fn print_summary(results: &[ExecutionResult], summary: &RunSummary, locale: &str) {
    println!("\n{}", t!("run_summary_banner", locale = locale).bold());

    for result in results {
        let status_colored = match result.status {
            ExecutionStatus::Pass => result.status.as_str().green(),
            ExecutionStatus::Fail => result.status.as_str().red(),
            ExecutionStatus::Blocked => result.status.as_str().yellow(),
        };
        let duration_str = format!("{:.2?}", result.duration);

        println!(
            "  - {:<8} | {:<30} | {:>10}",
            status_colored, result.case_id, duration_str
        );
    }

    println!();
    println!(
        "{}",
        t!("summary_total", locale = locale, count = summary.total)
    );
    println!(
        "{}",
        t!("summary_passed", locale = locale, count = summary.passed).green()
    );
    println!(
        "{}",
        t!("summary_failed", locale = locale, count = summary.failed).red()
    );
    println!(
        "{}",
        t!("summary_blocked", locale = locale, count = summary.blocked).yellow()
    );

    if summary.stopped_early {
        let not_run = summary.total - summary.executed();
        println!(
            "{}",
            t!("summary_stopped_early", locale = locale, count = not_run).yellow()
        );
    }
}

/// Prints detailed information about the first failed cases, helping the
/// operator see what went wrong without opening a report file. Blocked cases
/// are not detailed here; the summary already counts them.
///
/// 打印最先失败的若干用例的详细信息，帮助操作者无需打开报告文件即可
/// 看到出了什么问题。被阻塞的用例不在此详述；摘要中已对其计数。
///
/// # Arguments / 参数
/// * `results` - All results of the run, in matrix order
///               本次运行的所有结果，按矩阵顺序
/// * `show_failures` - Maximum number of failures to detail
///                     要详述的最大失败数量
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
pub fn print_failure_details(results: &[ExecutionResult], show_failures: usize, locale: &str) {
    let failures: Vec<&ExecutionResult> = results.iter().filter(|r| r.is_failure()).collect();
    if failures.is_empty() || show_failures == 0 {
        return;
    }

    let shown = failures.len().min(show_failures);
    println!(
        "\n{}",
        t!("failure_details_banner", locale = locale, count = shown)
            .red()
            .bold()
    );
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().take(show_failures).enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            shown,
            t!("failure_details_case", locale = locale).red(),
            result.case_id.cyan()
        );
        if !result.component.is_empty() {
            println!(
                "  {}",
                t!(
                    "failure_details_component",
                    locale = locale,
                    component = result.component
                )
            );
        }
        for reason in &result.failure_reasons {
            println!("  - {}", reason);
        }
        println!("{}", "-".repeat(80));
    }
}

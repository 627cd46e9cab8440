// src/commands/run.rs

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::core::{
    engine::{EngineConfig, ExecutionEngine},
    matrix::{load_case_matrix, CaseFilter},
};
use crate::reporting::{
    console::{print_failure_details, print_summary},
    junit::generate_junit_report,
    markdown::generate_markdown_report,
};
use crate::t;

/// The resolved `run` subcommand arguments.
/// 已解析的 `run` 子命令参数。
pub struct RunOptions {
    pub matrix: PathBuf,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub component: Option<String>,
    pub use_synthetic_actual: bool,
    pub max_failures: usize,
    pub show_failures: usize,
    pub junit_report: Option<PathBuf>,
    pub md_report: Option<PathBuf>,
    pub jobs: Option<usize>,
    /// Set when `--lang` was given explicitly; otherwise the matrix's
    /// `language` field decides the output locale.
    /// 显式给出 `--lang` 时设置；否则由矩阵的 `language` 字段决定输出语言。
    pub lang: Option<String>,
}

/// Runs a validation pass over the case matrix and returns the process exit
/// code: 0 when every executed case passed, 2 when any case failed or was
/// blocked. Errors obtaining the case collection propagate to the caller.
pub async fn execute(options: RunOptions) -> Result<u8> {
    let matrix = load_case_matrix(&options.matrix).with_context(|| {
        t!(
            "matrix_load_failed",
            locale = options.lang.as_deref().unwrap_or("en"),
            path = options.matrix.display()
        )
        .to_string()
    })?;

    let locale = match &options.lang {
        Some(lang) => lang.clone(),
        None => matrix.language.clone(),
    };
    rust_i18n::set_locale(&locale);

    println!(
        "{}",
        t!("loading_matrix", locale = locale, path = options.matrix.display())
    );

    let total_loaded = matrix.cases.len();
    let filter = CaseFilter::from_args(
        options.priority.as_deref(),
        options.status.as_deref(),
        options.component.as_deref(),
    );
    let cases = filter.apply(matrix.cases);

    println!(
        "{}",
        t!(
            "cases_loaded",
            locale = locale,
            loaded = total_loaded,
            filtered = cases.len()
        )
        .cyan()
    );

    if cases.is_empty() {
        println!("{}", t!("no_cases_matched", locale = locale).yellow());
        return Ok(0);
    }

    if options.use_synthetic_actual {
        println!("{}", t!("synthetic_mode_notice", locale = locale).yellow());
    }

    let overall_stop_token = setup_signal_handler(&locale)?;

    let engine = ExecutionEngine::new(EngineConfig {
        max_failures: options.max_failures,
        synthesize: options.use_synthetic_actual,
        jobs: options.jobs.unwrap_or(1),
    });
    let outcome = engine.run(cases, overall_stop_token).await;

    print_summary(&outcome.results, &outcome.summary, &locale);
    print_failure_details(&outcome.results, options.show_failures, &locale);

    // A report that cannot be written is a warning, not a run failure; the
    // exit code still reflects the validation outcome.
    if let Some(report_path) = &options.junit_report {
        match generate_junit_report(&outcome.results, report_path) {
            Ok(()) => println!(
                "{}",
                t!("junit_written", locale = locale, path = report_path.display())
            ),
            Err(e) => eprintln!(
                "{} {}",
                t!("junit_write_failed", locale = locale).red(),
                e
            ),
        }
    }

    if let Some(report_path) = &options.md_report {
        match generate_markdown_report(&outcome.results, &outcome.summary, report_path) {
            Ok(()) => println!(
                "{}",
                t!("md_written", locale = locale, path = report_path.display())
            ),
            Err(e) => eprintln!("{} {}", t!("md_write_failed", locale = locale).red(), e),
        }
    }

    if outcome.summary.has_defects() {
        println!("\n{}", t!("defects_detected", locale = locale).red().bold());
        Ok(2)
    } else {
        println!("\n{}", t!("all_cases_passed", locale = locale).green().bold());
        Ok(0)
    }
}

fn setup_signal_handler(locale: &str) -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl-C");
        println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
        token_clone.cancel();
    });

    Ok(token)
}

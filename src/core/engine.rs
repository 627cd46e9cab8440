//! # Execution Engine Module / 执行引擎模块
//!
//! This module provides the core functionality for running a validation pass
//! over an ordered case collection. It classifies every case as PASS, FAIL or
//! BLOCKED, enforces the early-stop failure limit, and tallies the run
//! summary. The engine performs no I/O of its own; synthesizing a missing
//! actual response is delegated to an injected generator.
//!
//! 此模块为在有序用例集合上运行验证提供核心功能。
//! 它将每个用例分类为 PASS、FAIL 或 BLOCKED，执行提前停止的失败上限，
//! 并统计运行摘要。引擎本身不执行任何 I/O；
//! 合成缺失的实际回复被委托给注入的生成器。

use futures::{stream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::evaluator::evaluate;
use crate::core::models::{Case, ExecutionResult, Response, RunSummary};
use crate::core::rules::parse_expression;
use crate::core::synth;

/// A generator that fabricates an actual response for a case, used only in
/// demo mode when the matrix records none.
/// 为用例伪造实际回复的生成器，仅在矩阵未记录回复时的演示模式下使用。
pub type SyntheticGenerator = Arc<dyn Fn(&Case) -> String + Send + Sync>;

/// Configuration for a validation run. Passed explicitly into the engine so
/// every call site (and every test) states its own behavior; there is no
/// process-wide state.
///
/// 一次验证运行的配置。显式传入引擎，使每个调用点（和每个测试）
/// 都声明自己的行为；不存在进程级全局状态。
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Stop starting new cases once this many cases have FAILED. Blocked
    /// cases do not advance the counter. `0` disables the limit.
    /// 一旦有这么多用例失败，就停止启动新的用例。
    /// 被阻塞的用例不会推进计数器。`0` 表示不设上限。
    pub max_failures: usize,
    /// When the matrix records no actual response, fabricate one with the
    /// injected generator instead of classifying the case as BLOCKED.
    /// 当矩阵未记录实际回复时，使用注入的生成器伪造一个，
    /// 而不是将该用例分类为 BLOCKED。
    pub synthesize: bool,
    /// How many cases may be validated concurrently. The default of 1 keeps
    /// the run fully deterministic; higher values still return results in
    /// matrix order.
    /// 可以并发验证的用例数量。默认值 1 使运行完全确定；
    /// 更高的值仍按矩阵顺序返回结果。
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_failures: 10,
            synthesize: false,
            jobs: 1,
        }
    }
}

/// Everything a run produces: the ordered result collection and the tally.
/// 一次运行产生的全部内容：有序的结果集合和统计。
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One result per executed case, in matrix order. Cases skipped by the
    /// failure limit have no entry here; `summary.total` still counts them.
    pub results: Vec<ExecutionResult>,
    pub summary: RunSummary,
}

/// Runs the validation decision across a case collection.
/// 在用例集合上运行验证决策。
#[derive(Clone)]
pub struct ExecutionEngine {
    config: EngineConfig,
    generator: SyntheticGenerator,
}

impl ExecutionEngine {
    /// Creates an engine with the default synthetic generator.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            generator: Arc::new(synth::default_synthetic_output),
        }
    }

    /// Creates an engine with a caller-supplied synthetic generator.
    pub fn with_generator(config: EngineConfig, generator: SyntheticGenerator) -> Self {
        Self { config, generator }
    }

    /// Validates every case in order and tallies the summary.
    ///
    /// The loop is an order-preserving buffered stream: with `jobs` > 1 the
    /// checks run concurrently but the result collection still follows
    /// matrix order. The failure limit is a shared counter; once it is
    /// reached no further case starts, in-flight cases finish normally, and
    /// the case that reached the limit is included in the results. The
    /// external `stop` token (Ctrl-C in the CLI) halts the loop the same
    /// way.
    pub async fn run(&self, cases: Vec<Case>, stop: CancellationToken) -> RunOutcome {
        let total = cases.len();
        let jobs = self.config.jobs.clamp(1, num_cpus::get());
        let limit_reached = CancellationToken::new();
        let failure_count = Arc::new(AtomicUsize::new(0));

        let outcomes: Vec<Result<Option<ExecutionResult>, tokio::task::JoinError>> =
            stream::iter(cases)
                .map(|case| {
                    let engine = self.clone();
                    let stop = stop.clone();
                    let limit_reached = limit_reached.clone();
                    let failure_count = Arc::clone(&failure_count);
                    tokio::spawn(async move {
                        if stop.is_cancelled() || limit_reached.is_cancelled() {
                            return None;
                        }
                        let result = engine.execute_case(&case);
                        if result.is_failure() {
                            let failures = failure_count.fetch_add(1, Ordering::SeqCst) + 1;
                            if engine.config.max_failures > 0
                                && failures >= engine.config.max_failures
                            {
                                limit_reached.cancel();
                            }
                        }
                        Some(result)
                    })
                })
                .buffered(jobs)
                .collect()
                .await;

        // Classification is pure, so a task can only vanish if it was
        // skipped; join errors are treated the same way.
        let results: Vec<ExecutionResult> = outcomes
            .into_iter()
            .filter_map(|joined| joined.ok().flatten())
            .collect();
        let summary = RunSummary::tally(total, &results, limit_reached.is_cancelled());
        RunOutcome { results, summary }
    }

    /// Classifies one case. The blocked check runs before anything else: a
    /// case without an actual response is never parsed or evaluated.
    fn execute_case(&self, case: &Case) -> ExecutionResult {
        let start = Instant::now();

        let supplied = case
            .actual
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        let raw_actual = match supplied {
            Some(text) => text.to_string(),
            None if self.config.synthesize => (self.generator)(case),
            None => {
                return ExecutionResult::blocked(
                    case,
                    "no actual response available",
                    start.elapsed(),
                );
            }
        };

        let response = Response::from_actual(&raw_actual);
        if response.is_blank() {
            return ExecutionResult::blocked(case, "actual response text is empty", start.elapsed());
        }

        // A malformed expectation fails this one case; the run continues.
        let rule = match parse_expression(&case.expected) {
            Ok(rule) => rule,
            Err(e) => {
                return ExecutionResult::failed(
                    case,
                    vec![format!("malformed expectation: {}", e)],
                    Vec::new(),
                    response.text,
                    start.elapsed(),
                );
            }
        };

        let applied_rules: Vec<String> = rule
            .atom_keywords()
            .into_iter()
            .map(str::to_string)
            .collect();
        let outcome = evaluate(&rule, &response);
        let duration = start.elapsed();

        if outcome.passed {
            ExecutionResult::passed(case, applied_rules, response.text, duration)
        } else {
            ExecutionResult::failed(case, outcome.failures, applied_rules, response.text, duration)
        }
    }
}

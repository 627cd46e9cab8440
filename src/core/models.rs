//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the matrix
//! validator. It includes models for test cases, recorded responses, per-case
//! execution results and run-level summaries.
//!
//! 此模块定义了整个矩阵验证器中使用的核心数据结构。
//! 它包括测试用例、已记录回复、单个用例执行结果和运行级摘要的模型。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Represents a single test case loaded from the case matrix.
/// Each `Case` pairs a declarative expectation with an optional recorded
/// actual response.
/// 代表从用例矩阵加载的单个测试用例。
/// 每个 `Case` 将声明式期望与可选的已记录实际回复配对。
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Case {
    /// The unique identifier for the case, used in logs and reports.
    /// 用例的唯一标识符，用于日志和报告。
    pub id: String,
    /// The scenario this case belongs to, grouping related cases.
    /// 此用例所属的场景，用于将相关用例分组。
    pub scenario: String,
    /// The component under test (e.g. "Chatbot", "Voice").
    /// 被测组件（例如 "Chatbot"、"Voice"）。
    pub component: String,
    /// A free-text description of what the case verifies.
    /// 用例验证内容的自由文本描述。
    pub description: String,
    /// The priority tag used for filtering (e.g. "Critical", "High").
    /// 用于过滤的优先级标签（例如 "Critical"、"High"）。
    pub priority: String,
    /// An optional workflow status tag (e.g. "Ready", "Draft").
    /// 可选的工作流状态标签（例如 "Ready"、"Draft"）。
    #[serde(default)]
    pub status: Option<String>,
    /// The kind of test this case represents (e.g. "Functional").
    /// 此用例代表的测试类型（例如 "Functional"）。
    #[serde(default)]
    pub test_type: String,
    /// Preconditions that must hold before the exchange is recorded.
    /// 记录交互之前必须满足的前置条件。
    #[serde(default)]
    pub prerequisites: String,
    /// The steps that produced the recorded exchange.
    /// 产生已记录交互的步骤。
    #[serde(default)]
    pub steps: String,
    /// The expectation expression evaluated against the actual response.
    /// An empty expression accepts any response.
    /// 针对实际回复求值的期望表达式。空表达式接受任何回复。
    #[serde(default)]
    pub expected: String,
    /// The recorded actual response, if one was captured. A plain string is
    /// taken as the response text; a JSON object may carry latency and
    /// status-code metadata alongside the text.
    /// 已记录的实际回复（如果捕获到）。纯字符串被视为回复文本；
    /// JSON 对象可以在文本之外携带延迟和状态码元数据。
    #[serde(default)]
    pub actual: Option<String>,
    /// Free-form notes carried through to reports.
    /// 传递到报告中的自由格式备注。
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for Case {
    fn default() -> Self {
        Self {
            id: "unknown".to_string(),
            scenario: "".to_string(),
            component: "".to_string(),
            description: "".to_string(),
            priority: "".to_string(),
            status: None,
            test_type: "".to_string(),
            prerequisites: "".to_string(),
            steps: "".to_string(),
            expected: "".to_string(),
            actual: None,
            notes: None,
        }
    }
}

/// A recorded response prepared for rule evaluation: the reply text plus the
/// optional transport metadata some matrices capture alongside it.
///
/// 为规则求值准备的已记录回复：回复文本以及某些矩阵随之捕获的可选传输元数据。
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Response {
    /// The response text the rules are evaluated against.
    /// 规则求值所针对的回复文本。
    #[serde(default)]
    pub text: String,
    /// Observed latency of the exchange in milliseconds, when recorded.
    /// 记录到的交互延迟（毫秒）。
    #[serde(default)]
    pub latency_ms: Option<u64>,
    /// Transport status code of the exchange, when recorded.
    /// 记录到的交互传输状态码。
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl Response {
    /// Creates a plain-text response with no metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            latency_ms: None,
            status_code: None,
        }
    }

    /// Builds a response from a raw actual-result value. A value that looks
    /// like a JSON object is decoded into text plus metadata; anything else
    /// (including an object that fails to decode) is taken as plain text.
    pub fn from_actual(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') {
            if let Ok(parsed) = serde_json::from_str::<Response>(trimmed) {
                return parsed;
            }
        }
        Response::text(raw)
    }

    /// Whether the response text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The terminal classification of one executed case.
/// 单个已执行用例的最终分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    /// The actual response satisfied every rule of the expectation.
    /// 实际回复满足了期望中的每条规则。
    Pass,
    /// The actual response violated at least one rule, or the expectation
    /// itself could not be parsed.
    /// 实际回复违反了至少一条规则，或期望本身无法解析。
    Fail,
    /// No actual response was available, so the case could not be assessed.
    /// 没有可用的实际回复，因此无法评估该用例。
    Blocked,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pass => "PASS",
            ExecutionStatus::Fail => "FAIL",
            ExecutionStatus::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the final result of validating a single case.
/// Immutable after creation; consumed by the reporters.
///
/// 表示验证单个用例的最终结果。
/// 创建后不可变；由报告器消费。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    /// The id of the case this result belongs to / 此结果所属用例的 id
    pub case_id: String,
    /// The component copied from the case, for report tables / 从用例复制的组件，用于报告表格
    pub component: String,
    /// The terminal classification / 最终分类
    pub status: ExecutionStatus,
    /// One-line disposition summary / 单行处理摘要
    pub details: String,
    /// One entry per violated rule, in expression order; empty on PASS and
    /// BLOCKED / 每条被违反的规则一个条目，按表达式顺序；PASS 和 BLOCKED 时为空
    pub failure_reasons: Vec<String>,
    /// The keywords of the rules that were evaluated / 被求值规则的关键字
    pub applied_rules: Vec<String>,
    /// The actual text the rules ran against; absent when BLOCKED
    /// 规则运行所针对的实际文本；BLOCKED 时缺失
    pub actual_text: Option<String>,
    /// The time taken to classify the case / 对用例进行分类所花费的时间
    pub duration: Duration,
}

impl ExecutionResult {
    /// Builds a PASS result.
    pub fn passed(
        case: &Case,
        applied_rules: Vec<String>,
        actual_text: String,
        duration: Duration,
    ) -> Self {
        Self {
            case_id: case.id.clone(),
            component: case.component.clone(),
            status: ExecutionStatus::Pass,
            details: "all rules passed".to_string(),
            failure_reasons: Vec::new(),
            applied_rules,
            actual_text: Some(actual_text),
            duration,
        }
    }

    /// Builds a FAIL result from the evaluator's failure reasons.
    pub fn failed(
        case: &Case,
        failure_reasons: Vec<String>,
        applied_rules: Vec<String>,
        actual_text: String,
        duration: Duration,
    ) -> Self {
        Self {
            case_id: case.id.clone(),
            component: case.component.clone(),
            status: ExecutionStatus::Fail,
            details: failure_reasons.join("; "),
            failure_reasons,
            applied_rules,
            actual_text: Some(actual_text),
            duration,
        }
    }

    /// Builds a BLOCKED result. No rules are evaluated for a blocked case,
    /// so the reason list stays empty and only `details` says why.
    pub fn blocked(case: &Case, details: &str, duration: Duration) -> Self {
        Self {
            case_id: case.id.clone(),
            component: case.component.clone(),
            status: ExecutionStatus::Blocked,
            details: details.to_string(),
            failure_reasons: Vec::new(),
            applied_rules: Vec::new(),
            actual_text: None,
            duration,
        }
    }

    /// Checks if the result is any kind of defect (FAIL or BLOCKED).
    pub fn is_defect(&self) -> bool {
        matches!(self.status, ExecutionStatus::Fail | ExecutionStatus::Blocked)
    }

    pub fn is_failure(&self) -> bool {
        self.status == ExecutionStatus::Fail
    }

    pub fn is_blocked(&self) -> bool {
        self.status == ExecutionStatus::Blocked
    }
}

/// Aggregate statistics over one validation run.
///
/// `total` always reports the number of cases supplied to the engine, even
/// when the run stopped early, so a truncated run is distinguishable from a
/// short matrix.
///
/// 一次验证运行的聚合统计信息。
/// `total` 始终报告提供给引擎的用例数量，即使运行提前停止，
/// 因此被截断的运行可以与较短的矩阵区分开。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Number of cases supplied, including any that were never started.
    /// 提供的用例数量，包括从未开始执行的用例。
    pub total: usize,
    /// Number of executed cases that passed / 已执行且通过的用例数量
    pub passed: usize,
    /// Number of executed cases that failed / 已执行且失败的用例数量
    pub failed: usize,
    /// Number of executed cases that were blocked / 已执行且被阻塞的用例数量
    pub blocked: usize,
    /// Whether the failure limit stopped the run before every case ran.
    /// 失败上限是否在所有用例运行完之前停止了本次运行。
    pub stopped_early: bool,
}

impl RunSummary {
    /// Tallies a summary from an ordered result collection.
    pub fn tally(total: usize, results: &[ExecutionResult], stopped_early: bool) -> Self {
        let passed = results
            .iter()
            .filter(|r| r.status == ExecutionStatus::Pass)
            .count();
        let failed = results.iter().filter(|r| r.is_failure()).count();
        let blocked = results.iter().filter(|r| r.is_blocked()).count();
        Self {
            total,
            passed,
            failed,
            blocked,
            stopped_early,
        }
    }

    /// Number of cases that actually ran.
    pub fn executed(&self) -> usize {
        self.passed + self.failed + self.blocked
    }

    /// Whether the run contains anything other than passes. Drives the
    /// process exit code.
    pub fn has_defects(&self) -> bool {
        self.failed > 0 || self.blocked > 0
    }
}

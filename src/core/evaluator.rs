//! # Evaluator Module / 求值器模块
//!
//! Walks a parsed rule tree against one response and reduces it to a single
//! verdict plus the ordered list of failure reasons. Both sides of an `AND`
//! are always evaluated so a chain reports every violated rule, not just the
//! first one; the reports are unusable otherwise.
//!
//! 针对单个回复遍历已解析的规则树，并将其归约为单一判定和有序的失败原因列表。
//! `AND` 的两侧总是都会被求值，因此规则链会报告每条被违反的规则，
//! 而不仅仅是第一条。

use crate::core::models::Response;
use crate::core::rules::Rule;
use crate::core::validators;

/// The outcome of evaluating one rule tree against one response.
/// 针对单个回复对一棵规则树求值的结果。
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    /// The conjunction of every atomic rule's verdict.
    pub passed: bool,
    /// One reason per violated atomic rule, in left-to-right tree order.
    /// Empty when `passed` is true.
    pub failures: Vec<String>,
}

/// Evaluates a rule tree against a response.
pub fn evaluate(rule: &Rule, response: &Response) -> EvaluationOutcome {
    let mut failures = Vec::new();
    collect_failures(rule, response, &mut failures);
    EvaluationOutcome {
        passed: failures.is_empty(),
        failures,
    }
}

fn collect_failures(rule: &Rule, response: &Response, failures: &mut Vec<String>) {
    match rule {
        Rule::And(left, right) => {
            collect_failures(left, response, failures);
            collect_failures(right, response, failures);
        }
        Rule::Always => {}
        atom => {
            if let Some(reason) = check_atom(atom, response) {
                failures.push(format!("{}: {}", atom.keyword(), reason));
            }
        }
    }
}

/// Dispatches one atomic rule to its validator.
fn check_atom(rule: &Rule, response: &Response) -> Option<String> {
    match rule {
        Rule::Contains(needle) => validators::check_contains(needle, response),
        Rule::NotEmpty => validators::check_not_empty(response),
        Rule::LengthMin(min) => validators::check_length_min(*min, response),
        Rule::Matches(pattern) => validators::check_matches(pattern, response),
        Rule::MaxLatencyMs(max_ms) => validators::check_max_latency(*max_ms, response),
        Rule::StatusCodeIs(code) => validators::check_status_code(*code, response),
        Rule::Always | Rule::And(..) => None,
    }
}

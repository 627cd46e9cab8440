//! # Synthetic Response Module / 合成回复模块
//!
//! Demo-mode generator that fabricates a plausible actual response for a case
//! whose matrix records none. The output is deterministic and aims to satisfy
//! the case's own expectation rules; it is never validated for realism.
//!
//! 演示模式生成器，为矩阵中未记录实际回复的用例伪造一个看似合理的回复。
//! 输出是确定性的，旨在满足用例自身的期望规则；从不验证其真实性。

use crate::core::models::Case;
use crate::core::rules::{parse_expression, Rule};

/// Fallback text when a case gives the generator nothing to work with.
const FALLBACK_TEXT: &str = "Response generated for demo purposes";

/// Cap on how much of a raw expectation is echoed back as synthetic text.
const MAX_ECHOED_EXPECTED: usize = 200;

/// Fabricates an actual response for a case from its expectation expression.
///
/// `CONTAINS:` operands make the best synthetic material, so the first two of
/// them (in expression order) are joined into the output. An expectation
/// without any, or one that does not parse, is echoed back truncated instead;
/// a blank expectation falls back to a fixed placeholder.
///
/// 从用例的期望表达式伪造一个实际回复。`CONTAINS:` 操作数是最好的合成材料，
/// 因此将其中（按表达式顺序）前两个拼接为输出。没有任何操作数或无法解析的期望
/// 将被截断后原样回显；空白期望则回退到固定的占位文本。
pub fn default_synthetic_output(case: &Case) -> String {
    if let Ok(rule) = parse_expression(&case.expected) {
        let needles = contains_operands(&rule);
        if !needles.is_empty() {
            return needles[..needles.len().min(2)].join(" ");
        }
    }

    let echoed: String = case.expected.chars().take(MAX_ECHOED_EXPECTED).collect();
    if echoed.trim().is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        echoed
    }
}

/// Collects the `CONTAINS:` operands of a rule tree in source order.
fn contains_operands(rule: &Rule) -> Vec<String> {
    match rule {
        Rule::Contains(needle) => vec![needle.clone()],
        Rule::And(left, right) => {
            let mut operands = contains_operands(left);
            operands.extend(contains_operands(right));
            operands
        }
        _ => Vec::new(),
    }
}

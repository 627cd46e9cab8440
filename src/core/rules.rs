//! # Rule Grammar Module / 规则语法模块
//!
//! This module defines the expectation rule tree and the parser that builds
//! it from an expression string. An expression is a chain of atoms joined by
//! the `AND` keyword:
//!
//! ```text
//! CONTAINS: order number AND NOT_EMPTY AND LENGTH_MIN: 10
//! ```
//!
//! Supported atoms: `CONTAINS: <text>`, `NOT_EMPTY`, `LENGTH_MIN: <n>`,
//! `REGEX: <pattern>`, `MAX_LATENCY_MS: <n>` and `STATUS_CODE: <n>`.
//! Keywords are case-sensitive; whitespace around tokens is ignored. `AND` is
//! the only combinator. An empty expression accepts any response.
//!
//! 此模块定义了期望规则树以及从表达式字符串构建它的解析器。
//! 表达式是由 `AND` 关键字连接的原子链。关键字区分大小写；
//! 标记周围的空白被忽略。`AND` 是唯一的组合符。空表达式接受任何回复。

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Splits an expression into atoms. The keyword must be surrounded by
/// whitespace so it cannot be confused with text inside a `CONTAINS:` operand.
static AND_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+AND\s+").expect("separator pattern is valid"));

/// Errors produced while parsing an expectation expression.
/// 解析期望表达式时产生的错误。
#[derive(Error, Debug)]
pub enum MalformedRuleError {
    /// The atom does not start with any supported keyword.
    #[error("unknown rule keyword '{0}'")]
    UnknownKeyword(String),

    /// A keyword that requires an operand has nothing after its colon.
    #[error("rule '{keyword}' is missing its operand")]
    MissingOperand { keyword: &'static str },

    /// A numeric operand did not parse as a non-negative integer. Caught
    /// here so a bad matrix fails at load, not in the middle of a run.
    #[error("rule '{keyword}' expects a non-negative integer, got '{value}'")]
    InvalidInteger {
        keyword: &'static str,
        value: String,
    },

    /// A `REGEX:` operand failed to compile.
    #[error("rule 'REGEX' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A parsed expectation expression. The tree is immutable once built;
/// evaluation never mutates it.
///
/// 已解析的期望表达式。树一旦构建就不可变；求值永远不会修改它。
#[derive(Debug, Clone)]
pub enum Rule {
    /// The empty expression: accepts any response.
    /// 空表达式：接受任何回复。
    Always,
    /// Passes iff the operand is found verbatim in the response text.
    /// 当且仅当在回复文本中逐字找到操作数时通过。
    Contains(String),
    /// Passes iff the response text is non-empty after trimming whitespace.
    /// 当且仅当回复文本去除空白后非空时通过。
    NotEmpty,
    /// Passes iff the response text has at least this many characters.
    /// 当且仅当回复文本至少包含这么多字符时通过。
    LengthMin(usize),
    /// Passes iff the case-insensitive pattern matches the response text.
    /// 当且仅当不区分大小写的模式匹配回复文本时通过。
    Matches(Regex),
    /// Passes iff the recorded latency does not exceed the operand.
    /// 当且仅当记录的延迟不超过操作数时通过。
    MaxLatencyMs(u64),
    /// Passes iff the recorded status code equals the operand.
    /// 当且仅当记录的状态码等于操作数时通过。
    StatusCodeIs(u16),
    /// Passes iff both children pass. Chains lean left, so evaluation order
    /// follows the source expression left to right.
    /// 当且仅当两个子规则都通过时通过。链向左倾斜，
    /// 因此求值顺序与源表达式从左到右一致。
    And(Box<Rule>, Box<Rule>),
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Rule::Always, Rule::Always) => true,
            (Rule::Contains(a), Rule::Contains(b)) => a == b,
            (Rule::NotEmpty, Rule::NotEmpty) => true,
            (Rule::LengthMin(a), Rule::LengthMin(b)) => a == b,
            // Compiled patterns compare by their source text.
            (Rule::Matches(a), Rule::Matches(b)) => a.as_str() == b.as_str(),
            (Rule::MaxLatencyMs(a), Rule::MaxLatencyMs(b)) => a == b,
            (Rule::StatusCodeIs(a), Rule::StatusCodeIs(b)) => a == b,
            (Rule::And(al, ar), Rule::And(bl, br)) => al == bl && ar == br,
            _ => false,
        }
    }
}

impl Rule {
    /// The grammar keyword of this node.
    pub fn keyword(&self) -> &'static str {
        match self {
            Rule::Always => "ALWAYS",
            Rule::Contains(_) => "CONTAINS",
            Rule::NotEmpty => "NOT_EMPTY",
            Rule::LengthMin(_) => "LENGTH_MIN",
            Rule::Matches(_) => "REGEX",
            Rule::MaxLatencyMs(_) => "MAX_LATENCY_MS",
            Rule::StatusCodeIs(_) => "STATUS_CODE",
            Rule::And(..) => "AND",
        }
    }

    /// Collects the keywords of the atomic rules in source order. Used by
    /// the engine to record which checks a result is based on.
    pub fn atom_keywords(&self) -> Vec<&'static str> {
        match self {
            Rule::And(left, right) => {
                let mut keywords = left.atom_keywords();
                keywords.extend(right.atom_keywords());
                keywords
            }
            Rule::Always => Vec::new(),
            atom => vec![atom.keyword()],
        }
    }
}

/// Parses an expectation expression into a rule tree.
///
/// Atoms are combined left-to-right into a left-leaning `And` chain. An
/// empty or blank expression parses to [`Rule::Always`]: a case without an
/// explicit expectation accepts any response rather than rejecting all of
/// them.
pub fn parse_expression(expression: &str) -> Result<Rule, MalformedRuleError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Ok(Rule::Always);
    }

    let mut rule: Option<Rule> = None;
    for atom in AND_SEPARATOR.split(trimmed) {
        let parsed = parse_atom(atom)?;
        rule = Some(match rule {
            Some(left) => Rule::And(Box::new(left), Box::new(parsed)),
            None => parsed,
        });
    }
    Ok(rule.unwrap_or(Rule::Always))
}

/// Parses a single atom of the expression.
fn parse_atom(atom: &str) -> Result<Rule, MalformedRuleError> {
    let atom = atom.trim();

    if atom == "NOT_EMPTY" {
        return Ok(Rule::NotEmpty);
    }
    if let Some(rest) = atom.strip_prefix("CONTAINS:") {
        let needle = rest.trim();
        if needle.is_empty() {
            return Err(MalformedRuleError::MissingOperand { keyword: "CONTAINS" });
        }
        return Ok(Rule::Contains(needle.to_string()));
    }
    if let Some(rest) = atom.strip_prefix("LENGTH_MIN:") {
        return parse_integer::<usize>(rest, "LENGTH_MIN").map(Rule::LengthMin);
    }
    if let Some(rest) = atom.strip_prefix("REGEX:") {
        let pattern = rest.trim();
        if pattern.is_empty() {
            return Err(MalformedRuleError::MissingOperand { keyword: "REGEX" });
        }
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| MalformedRuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        return Ok(Rule::Matches(compiled));
    }
    if let Some(rest) = atom.strip_prefix("MAX_LATENCY_MS:") {
        return parse_integer::<u64>(rest, "MAX_LATENCY_MS").map(Rule::MaxLatencyMs);
    }
    if let Some(rest) = atom.strip_prefix("STATUS_CODE:") {
        return parse_integer::<u16>(rest, "STATUS_CODE").map(Rule::StatusCodeIs);
    }

    // Name the leading token so the report points at the offending keyword.
    let keyword = atom.split([':', ' ', '\t']).next().unwrap_or(atom);
    Err(MalformedRuleError::UnknownKeyword(keyword.to_string()))
}

/// Parses a numeric operand, rejecting anything that is not a non-negative
/// integer.
fn parse_integer<T: std::str::FromStr>(
    raw: &str,
    keyword: &'static str,
) -> Result<T, MalformedRuleError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(MalformedRuleError::MissingOperand { keyword });
    }
    value
        .parse::<T>()
        .map_err(|_| MalformedRuleError::InvalidInteger {
            keyword,
            value: value.to_string(),
        })
}

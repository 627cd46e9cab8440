//! # Rule Validators Module / 规则验证器模块
//!
//! One pure function per atomic rule kind. Each check takes its operands and
//! a [`Response`] and returns `None` when the rule is satisfied, or a
//! human-readable failure message when it is not. Validators never fail for
//! well-formed input.
//!
//! 每种原子规则一个纯函数。每个检查接收其操作数和一个 [`Response`]，
//! 规则满足时返回 `None`，否则返回可读的失败消息。
//! 对于格式正确的输入，验证器永远不会出错。

use crate::core::models::Response;
use regex::Regex;

/// Cap on the amount of actual text quoted inside a failure message, so
/// long transcripts do not swamp the reports.
pub const MAX_SHOWN_ACTUAL: usize = 200;

/// Quotes the actual text for a failure message, truncated to
/// [`MAX_SHOWN_ACTUAL`] characters.
fn shown_actual(text: &str) -> String {
    if text.chars().count() <= MAX_SHOWN_ACTUAL {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_SHOWN_ACTUAL).collect();
    format!("{}...", truncated)
}

/// The response text must contain the needle verbatim.
pub fn check_contains(needle: &str, response: &Response) -> Option<String> {
    if response.text.contains(needle) {
        None
    } else {
        Some(format!(
            "expected response to contain '{}', got: '{}'",
            needle,
            shown_actual(&response.text)
        ))
    }
}

/// The response text must be non-empty after trimming whitespace.
pub fn check_not_empty(response: &Response) -> Option<String> {
    if response.text.trim().is_empty() {
        Some("response text is empty".to_string())
    } else {
        None
    }
}

/// The response text must have at least `min` characters. A text of exactly
/// `min` characters passes.
pub fn check_length_min(min: usize, response: &Response) -> Option<String> {
    let length = response.text.chars().count();
    if length >= min {
        None
    } else {
        Some(format!(
            "response length {} is below the minimum {}",
            length, min
        ))
    }
}

/// The pattern must match somewhere in the response text.
pub fn check_matches(pattern: &Regex, response: &Response) -> Option<String> {
    if pattern.is_match(&response.text) {
        None
    } else {
        Some(format!(
            "expected response to match pattern '{}', got: '{}'",
            pattern.as_str(),
            shown_actual(&response.text)
        ))
    }
}

/// The recorded latency must not exceed `max_ms`. A response without a
/// recorded latency fails the check rather than passing silently.
pub fn check_max_latency(max_ms: u64, response: &Response) -> Option<String> {
    match response.latency_ms {
        None => Some("response latency is not provided".to_string()),
        Some(latency) if latency <= max_ms => None,
        Some(latency) => Some(format!(
            "response latency {}ms exceeds the maximum {}ms",
            latency, max_ms
        )),
    }
}

/// The recorded status code must equal `expected`. A response without a
/// recorded status code fails the check.
pub fn check_status_code(expected: u16, response: &Response) -> Option<String> {
    match response.status_code {
        None => Some("response status code is not provided".to_string()),
        Some(code) if code == expected => None,
        Some(code) => Some(format!(
            "response status code {} does not match expected {}",
            code, expected
        )),
    }
}

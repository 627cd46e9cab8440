//! # Case Matrix Module / 用例矩阵模块
//!
//! This module handles loading the case matrix configuration from a TOML file
//! and pre-filtering the loaded cases. The matrix file carries global settings
//! (such as the output language) and a `[[cases]]` array with one entry per
//! test case.
//!
//! 此模块处理从 TOML 文件加载用例矩阵配置以及对已加载用例的预过滤。
//! 矩阵文件携带全局设置（例如输出语言）和一个 `[[cases]]` 数组，
//! 每个测试用例一个条目。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::models::Case;

/// Errors raised while obtaining the case collection. Unlike a malformed
/// expectation inside one case, these are fatal to the whole run.
/// 获取用例集合时产生的错误。与单个用例中格式错误的期望不同，
/// 这些错误对整次运行是致命的。
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("failed to read case matrix '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse case matrix '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("duplicate case id '{id}' in case matrix '{path}'")]
    DuplicateId { id: String, path: String },
}

/// Represents the entire case matrix configuration, loaded from a TOML file.
/// It contains global settings and a list of all test cases.
/// 代表从 TOML 文件加载的整个用例矩阵配置。
/// 它包含全局设置和所有测试用例的列表。
#[derive(Debug, Deserialize, Serialize)]
pub struct CaseMatrix {
    /// The language for the validator's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 验证器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// A vector containing all the test cases, in matrix order.
    /// 一个按矩阵顺序包含所有测试用例的向量。
    pub cases: Vec<Case>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Loads and validates a case matrix from a TOML file.
///
/// Case ids must be unique across the matrix; a duplicate id is rejected at
/// load so every result and report row is unambiguous.
///
/// 从 TOML 文件加载并验证用例矩阵。
/// 用例 id 在整个矩阵中必须唯一；重复的 id 在加载时被拒绝，
/// 以确保每个结果和报告行都没有歧义。
pub fn load_case_matrix(path: &Path) -> Result<CaseMatrix, MatrixError> {
    let content = fs::read_to_string(path).map_err(|source| MatrixError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let matrix: CaseMatrix = toml::from_str(&content).map_err(|source| MatrixError::Parse {
        path: path.display().to_string(),
        source: Box::new(source),
    })?;

    let mut seen = HashSet::new();
    for case in &matrix.cases {
        if !seen.insert(case.id.as_str()) {
            return Err(MatrixError::DuplicateId {
                id: case.id.clone(),
                path: path.display().to_string(),
            });
        }
    }

    Ok(matrix)
}

/// A pre-filter over the loaded case collection. Each field holds the
/// accepted values for one case attribute; values within a field are
/// OR-combined, fields are AND-combined. Matching is case-insensitive.
///
/// 对已加载用例集合的预过滤器。每个字段保存一个用例属性的可接受值；
/// 字段内的值以 OR 组合，字段之间以 AND 组合。匹配不区分大小写。
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    priorities: Vec<String>,
    statuses: Vec<String>,
    components: Vec<String>,
}

impl CaseFilter {
    /// Builds a filter from the comma-separated CLI arguments. A `None` or
    /// blank argument leaves that field unfiltered.
    pub fn from_args(
        priority: Option<&str>,
        status: Option<&str>,
        component: Option<&str>,
    ) -> Self {
        Self {
            priorities: split_values(priority),
            statuses: split_values(status),
            components: split_values(component),
        }
    }

    /// Whether the filter accepts every case.
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty() && self.statuses.is_empty() && self.components.is_empty()
    }

    /// Keeps the cases that satisfy every non-empty field, preserving the
    /// matrix order.
    pub fn apply(&self, cases: Vec<Case>) -> Vec<Case> {
        if self.is_empty() {
            return cases;
        }
        cases.into_iter().filter(|c| self.matches(c)).collect()
    }

    fn matches(&self, case: &Case) -> bool {
        field_matches(&self.priorities, Some(&case.priority))
            && field_matches(&self.statuses, case.status.as_deref())
            && field_matches(&self.components, Some(&case.component))
    }
}

/// Splits a comma-separated argument into trimmed, non-empty values.
fn split_values(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// An empty accepted-value list places no constraint on the field. A case
/// without a value (e.g. no status tag) fails any non-empty constraint.
fn field_matches(accepted: &[String], value: Option<&str>) -> bool {
    if accepted.is_empty() {
        return true;
    }
    match value {
        Some(value) => accepted.iter().any(|a| a.eq_ignore_ascii_case(value.trim())),
        None => false,
    }
}

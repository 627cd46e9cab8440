//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Matrix Validator,
//! including case models, the rule grammar, evaluation and the execution engine.
//!
//! 此模块包含 Matrix Validator 的核心功能，
//! 包括用例模型、规则语法、求值以及执行引擎。

pub mod engine;
pub mod evaluator;
pub mod matrix;
pub mod models;
pub mod rules;
pub mod synth;
pub mod validators;

// Re-exports
pub use engine::{EngineConfig, ExecutionEngine, RunOutcome};
pub use evaluator::{evaluate, EvaluationOutcome};
pub use matrix::{load_case_matrix, CaseFilter, CaseMatrix};
pub use models::{Case, ExecutionResult, ExecutionStatus, Response, RunSummary};
pub use rules::{parse_expression, MalformedRuleError, Rule};

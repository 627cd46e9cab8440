//! # Matrix Validator Library / Matrix Validator 库
//!
//! This library provides the core functionality for the Matrix Validator tool,
//! a configuration-driven validation executor for conversational AI test matrices.
//! It checks recorded assistant responses against declarative expectation rules.
//!
//! 此库为 Matrix Validator 工具提供核心功能，
//! 这是一个配置驱动的对话式 AI 测试矩阵验证执行器。
//! 它根据声明式的期望规则检查已记录的助手回复。
//!
//! ## Modules / 模块
//!
//! - `core` - Case models, rule grammar, evaluation and the execution engine
//! - `infra` - Infrastructure services like file system operations
//! - `reporting` - Result reporting: console summary, JUnit XML and Markdown
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 用例模型、规则语法、求值以及执行引擎
//! - `infra` - 基础设施服务，如文件系统操作
//! - `reporting` - 结果报告：控制台摘要、JUnit XML 和 Markdown
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::engine;
pub use core::matrix;
pub use core::models;
pub use core::rules;
pub use rust_i18n::t;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

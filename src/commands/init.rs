//! # Case Matrix Initialization Module / 用例矩阵初始化模块
//!
//! This module provides functionality for initializing a new case matrix
//! through an interactive command-line wizard. It helps users create a
//! `CaseMatrix.toml` file with sample conversational test cases so the first
//! `run` has something real to validate.
//!
//! 此模块通过交互式命令行向导提供初始化新用例矩阵的功能。
//! 它帮助用户创建带有示例对话测试用例的 `CaseMatrix.toml` 文件，
//! 使第一次 `run` 有真实内容可以验证。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use std::fs;
use std::path::Path;

use crate::core::matrix::CaseMatrix;
use crate::core::models::Case;
use crate::t;

/// Runs the interactive wizard to generate a `CaseMatrix.toml` file.
///
/// The wizard asks for the component under test and a selection of sample
/// case templates, then writes the matrix. With `non_interactive` set, the
/// default matrix is written without any prompts.
///
/// 运行交互式向导以生成 `CaseMatrix.toml` 文件。
/// 向导询问被测组件和一组示例用例模板，然后写入矩阵。
/// 设置 `non_interactive` 时，直接写入默认矩阵而不进行任何提示。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("CaseMatrix.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
        println!("{}", t!("init_wizard_description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    if non_interactive {
        let default_matrix = generate_default_matrix(language, "Chatbot");
        write_config(config_path, &default_matrix, language)?;
        return Ok(());
    }

    // Interactive part starts here
    let component: String = Input::with_theme(&theme)
        .with_prompt(t!("init_component_prompt", locale = language))
        .default("Chatbot".to_string())
        .interact_text()?;

    let options = vec![
        ("greeting", t!("init_template_greeting", locale = language)),
        ("order_status", t!("init_template_order_status", locale = language)),
        ("fallback", t!("init_template_fallback", locale = language)),
        ("latency", t!("init_template_latency", locale = language)),
    ];

    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init_case_selection_prompt", locale = language))
        .items(&options.iter().map(|o| o.1.clone()).collect::<Vec<_>>())
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    if selections.is_empty() {
        println!("{}", t!("init_no_cases_selected", locale = language).yellow());
    }

    let mut selected_cases = Vec::new();

    for i in selections {
        let selection_key = options[i].0;
        let case_number = selected_cases.len() + 1;
        let case = match selection_key {
            "greeting" => greeting_case(case_number, &component),
            "order_status" => order_status_case(case_number, &component),
            "fallback" => fallback_case(case_number, &component),
            "latency" => latency_case(case_number, &component),
            _ => continue,
        };
        selected_cases.push(case);
    }

    let final_matrix = if selected_cases.is_empty() {
        generate_default_matrix(language, &component)
    } else {
        CaseMatrix {
            language: language.to_string(),
            cases: selected_cases,
        }
    };

    write_config(config_path, &final_matrix, language)
}

/// The matrix written when the user selects nothing or skips the wizard:
/// two cases with recorded responses, so a first run passes out of the box.
fn generate_default_matrix(language: &str, component: &str) -> CaseMatrix {
    CaseMatrix {
        language: language.to_string(),
        cases: vec![greeting_case(1, component), order_status_case(2, component)],
    }
}

fn greeting_case(number: usize, component: &str) -> Case {
    Case {
        id: format!("TC-{:03}", number),
        scenario: "SC-001".to_string(),
        component: component.to_string(),
        description: "The assistant greets the user at the start of a session".to_string(),
        priority: "High".to_string(),
        status: Some("Ready".to_string()),
        test_type: "Functional".to_string(),
        expected: "CONTAINS: Hello AND NOT_EMPTY".to_string(),
        actual: Some("Hello! How can I help you today?".to_string()),
        ..Default::default()
    }
}

fn order_status_case(number: usize, component: &str) -> Case {
    Case {
        id: format!("TC-{:03}", number),
        scenario: "SC-002".to_string(),
        component: component.to_string(),
        description: "The assistant returns the order number when asked about an order".to_string(),
        priority: "Critical".to_string(),
        status: Some("Ready".to_string()),
        test_type: "Functional".to_string(),
        expected: "CONTAINS: order number AND NOT_EMPTY".to_string(),
        actual: Some("Your order number is 12345".to_string()),
        ..Default::default()
    }
}

fn fallback_case(number: usize, component: &str) -> Case {
    Case {
        id: format!("TC-{:03}", number),
        scenario: "SC-003".to_string(),
        component: component.to_string(),
        description: "The assistant produces a substantial fallback for unclear input".to_string(),
        priority: "Medium".to_string(),
        status: Some("Ready".to_string()),
        test_type: "Functional".to_string(),
        expected: "NOT_EMPTY AND LENGTH_MIN: 10".to_string(),
        actual: Some("I'm sorry, I didn't catch that. Could you rephrase?".to_string()),
        ..Default::default()
    }
}

fn latency_case(number: usize, component: &str) -> Case {
    Case {
        id: format!("TC-{:03}", number),
        scenario: "SC-004".to_string(),
        component: component.to_string(),
        description: "The assistant answers within the latency budget".to_string(),
        priority: "High".to_string(),
        status: Some("Ready".to_string()),
        test_type: "Performance".to_string(),
        expected: "NOT_EMPTY AND MAX_LATENCY_MS: 1500".to_string(),
        actual: Some(
            r#"{"text": "Here is the information you asked for.", "latency_ms": 850, "status_code": 200}"#
                .to_string(),
        ),
        ..Default::default()
    }
}

fn write_config(path: &Path, matrix: &CaseMatrix, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(matrix)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}

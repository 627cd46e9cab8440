// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::commands::{self, run::RunOptions};
use crate::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn build_cli(locale: &str) -> Command {
    Command::new("matrix-validator")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("matrix")
                        .short('m')
                        .long("matrix")
                        .help(t!("arg_matrix", locale = locale).to_string())
                        .value_name("MATRIX")
                        .default_value("CaseMatrix.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .help(t!("arg_priority", locale = locale).to_string())
                        .value_name("PRIORITY")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help(t!("arg_status", locale = locale).to_string())
                        .value_name("STATUS")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("component")
                        .long("component")
                        .help(t!("arg_component", locale = locale).to_string())
                        .value_name("COMPONENT")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("use-synthetic-actual")
                        .long("use-synthetic-actual")
                        .help(t!("arg_synthetic", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-failures")
                        .long("max-failures")
                        .help(t!("arg_max_failures", locale = locale).to_string())
                        .value_name("MAX_FAILURES")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("show-failures")
                        .long("show-failures")
                        .help(t!("arg_show_failures", locale = locale).to_string())
                        .value_name("SHOW_FAILURES")
                        .default_value("5")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("junit-report")
                        .long("junit-report")
                        .help(t!("arg_junit_report", locale = locale).to_string())
                        .value_name("JUNIT_REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("md-report")
                        .long("md-report")
                        .help(t!("arg_md_report", locale = locale).to_string())
                        .value_name("MD_REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help(t!("arg_jobs", locale = locale).to_string())
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Parses the command line and dispatches to the subcommands. Returns the
/// process exit code: 0 when every case passed, 2 when any case failed or
/// was blocked. Runtime errors (an unreadable matrix, an invalid schema)
/// propagate as `Err` and become exit code 1 in `main`.
pub async fn run() -> Result<u8> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);
    let lang_explicit = env::args().any(|arg| arg == "--lang");

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let options = RunOptions {
                matrix: run_matches
                    .get_one::<PathBuf>("matrix")
                    .unwrap() // Has default
                    .clone(),
                priority: run_matches.get_one::<String>("priority").cloned(),
                status: run_matches.get_one::<String>("status").cloned(),
                component: run_matches.get_one::<String>("component").cloned(),
                use_synthetic_actual: run_matches.get_flag("use-synthetic-actual"),
                max_failures: *run_matches.get_one::<usize>("max-failures").unwrap(), // Has default
                show_failures: *run_matches.get_one::<usize>("show-failures").unwrap(), // Has default
                junit_report: run_matches.get_one::<PathBuf>("junit-report").cloned(),
                md_report: run_matches.get_one::<PathBuf>("md-report").cloned(),
                jobs: run_matches.get_one::<usize>("jobs").copied(),
                lang: if lang_explicit {
                    Some(language.clone())
                } else {
                    None
                },
            };

            commands::run::execute(options).await
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if !lang_explicit {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&language, non_interactive)?;
            Ok(0)
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
            Ok(0)
        }
    }
}

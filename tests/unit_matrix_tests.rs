//! # Matrix Module Unit Tests / Matrix 模块单元测试
//!
//! This module contains unit tests for the `matrix.rs` module, testing the
//! TOML case matrix loading, schema validation and case filtering.
//!
//! 此模块包含 `matrix.rs` 模块的单元测试，
//! 测试 TOML 用例矩阵加载、模式验证和用例过滤。

mod common;

use std::path::Path;
use tempfile::tempdir;

use common::{make_case, passing_matrix, write_matrix};
use matrix_validator::core::matrix::{load_case_matrix, CaseFilter, MatrixError};

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_load_valid_matrix() {
        let temp_dir = tempdir().unwrap();
        let path = write_matrix(&temp_dir, "CaseMatrix.toml", passing_matrix());

        let matrix = load_case_matrix(&path).unwrap();

        assert_eq!(matrix.language, "en");
        assert_eq!(matrix.cases.len(), 2);
        assert_eq!(matrix.cases[0].id, "TC-001");
        assert_eq!(matrix.cases[1].id, "TC-002");
    }

    #[test]
    fn test_language_defaults_to_english() {
        let temp_dir = tempdir().unwrap();
        let path = write_matrix(
            &temp_dir,
            "CaseMatrix.toml",
            r#"
[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "No language field"
priority = "High"
"#,
        );

        let matrix = load_case_matrix(&path).unwrap();
        assert_eq!(matrix.language, "en");
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_case_matrix(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, MatrixError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let temp_dir = tempdir().unwrap();
        let path = write_matrix(
            &temp_dir,
            "broken.toml",
            r#"
language = "en"
[[cases]
id = "TC-001"
"#,
        );

        let err = load_case_matrix(&path).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { .. }));
    }

    #[test]
    fn test_missing_required_field_is_a_parse_error() {
        let temp_dir = tempdir().unwrap();
        let path = write_matrix(
            &temp_dir,
            "incomplete.toml",
            r#"
language = "en"

[[cases]]
id = "TC-001"
description = "Missing scenario, component and priority"
"#,
        );

        let err = load_case_matrix(&path).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_case_id_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = write_matrix(
            &temp_dir,
            "duplicated.toml",
            r#"
language = "en"

[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "First"
priority = "High"

[[cases]]
id = "TC-001"
scenario = "SC-002"
component = "Chatbot"
description = "Same id again"
priority = "Low"
"#,
        );

        let err = load_case_matrix(&path).unwrap_err();
        match err {
            MatrixError::DuplicateId { id, .. } => assert_eq!(id, "TC-001"),
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message_names_the_path() {
        let err = load_case_matrix(Path::new("missing-matrix.toml")).unwrap_err();
        assert!(err.to_string().contains("missing-matrix.toml"));
    }
}

#[cfg(test)]
mod filter_tests {
    use super::*;
    use matrix_validator::core::models::Case;

    fn sample_cases() -> Vec<Case> {
        let mut critical_voice = make_case("TC-001", "NOT_EMPTY", Some("ok"));
        critical_voice.priority = "Critical".to_string();
        critical_voice.component = "Voice".to_string();

        let mut high_chatbot = make_case("TC-002", "NOT_EMPTY", Some("ok"));
        high_chatbot.priority = "High".to_string();
        high_chatbot.component = "Chatbot".to_string();

        let mut draft = make_case("TC-003", "NOT_EMPTY", Some("ok"));
        draft.priority = "Low".to_string();
        draft.component = "Chatbot".to_string();
        draft.status = Some("Draft".to_string());

        let mut untagged = make_case("TC-004", "NOT_EMPTY", Some("ok"));
        untagged.priority = "High".to_string();
        untagged.component = "Voice".to_string();
        untagged.status = None;

        vec![critical_voice, high_chatbot, draft, untagged]
    }

    fn ids(cases: &[Case]) -> Vec<&str> {
        cases.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = CaseFilter::from_args(None, None, None);
        assert!(filter.is_empty());

        let filtered = filter.apply(sample_cases());
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_values_within_a_field_are_or_combined() {
        let filter = CaseFilter::from_args(Some("Critical,Low"), None, None);
        let filtered = filter.apply(sample_cases());
        assert_eq!(ids(&filtered), vec!["TC-001", "TC-003"]);
    }

    #[test]
    fn test_fields_are_and_combined() {
        let filter = CaseFilter::from_args(Some("High"), None, Some("Chatbot"));
        let filtered = filter.apply(sample_cases());
        assert_eq!(ids(&filtered), vec!["TC-002"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let filter = CaseFilter::from_args(Some("critical"), None, Some("VOICE"));
        let filtered = filter.apply(sample_cases());
        assert_eq!(ids(&filtered), vec!["TC-001"]);
    }

    #[test]
    fn test_status_filter_drops_untagged_cases() {
        // TC-004 carries no status tag, so any status constraint excludes it.
        let filter = CaseFilter::from_args(None, Some("Ready"), None);
        let filtered = filter.apply(sample_cases());
        assert_eq!(ids(&filtered), vec!["TC-001", "TC-002"]);
    }

    #[test]
    fn test_filter_preserves_matrix_order() {
        let filter = CaseFilter::from_args(Some("High,Critical"), None, None);
        let filtered = filter.apply(sample_cases());
        assert_eq!(ids(&filtered), vec!["TC-001", "TC-002", "TC-004"]);
    }

    #[test]
    fn test_blank_filter_values_are_ignored() {
        let filter = CaseFilter::from_args(Some(" , "), None, None);
        assert!(filter.is_empty());
    }
}

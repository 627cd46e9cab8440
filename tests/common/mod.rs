// Shared test helpers for integration tests
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use matrix_validator::core::models::{Case, ExecutionResult};
use std::time::Duration;

/// Writes a matrix file with the given content into the temp directory and
/// returns its path.
pub fn write_matrix(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let matrix_path = temp_dir.path().join(name);
    fs::write(&matrix_path, content).expect("Failed to write matrix file");
    matrix_path
}

/// A matrix whose two cases both pass against their recorded responses.
pub fn passing_matrix() -> &'static str {
    r#"
language = "en"

[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "Greets the user"
priority = "High"
status = "Ready"
expected = "CONTAINS: Hello AND NOT_EMPTY"
actual = "Hello! How can I help you today?"

[[cases]]
id = "TC-002"
scenario = "SC-002"
component = "Chatbot"
description = "Returns the order number"
priority = "Critical"
status = "Ready"
expected = "CONTAINS: order number AND NOT_EMPTY"
actual = "Your order number is 12345"
"#
}

/// A matrix with one failing case among passing ones.
pub fn failing_matrix() -> &'static str {
    r#"
language = "en"

[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "Greets the user"
priority = "High"
expected = "CONTAINS: Hello"
actual = "Hello there"

[[cases]]
id = "TC-002"
scenario = "SC-002"
component = "Chatbot"
description = "Returns the order number"
priority = "Critical"
expected = "CONTAINS: order number AND LENGTH_MIN: 100"
actual = "We cannot find it"
"#
}

/// A matrix whose single case records no actual response.
pub fn blocked_matrix() -> &'static str {
    r#"
language = "en"

[[cases]]
id = "TC-001"
scenario = "SC-001"
component = "Chatbot"
description = "Greets the user"
priority = "High"
expected = "CONTAINS: Hello"
"#
}

/// Builds a case with the fields the engine cares about.
pub fn make_case(id: &str, expected: &str, actual: Option<&str>) -> Case {
    Case {
        id: id.to_string(),
        scenario: "SC-001".to_string(),
        component: "Chatbot".to_string(),
        description: format!("case {}", id),
        priority: "High".to_string(),
        status: Some("Ready".to_string()),
        expected: expected.to_string(),
        actual: actual.map(str::to_string),
        ..Default::default()
    }
}

/// A small mixed result collection for the report writers: one of each
/// status, in matrix order.
pub fn mixed_results() -> Vec<ExecutionResult> {
    let pass_case = make_case("TC-001", "CONTAINS: Hello", Some("Hello there"));
    let fail_case = make_case("TC-002", "CONTAINS: order number", Some("We cannot find it"));
    let blocked_case = make_case("TC-003", "NOT_EMPTY", None);

    vec![
        ExecutionResult::passed(
            &pass_case,
            vec!["CONTAINS".to_string()],
            "Hello there".to_string(),
            Duration::from_millis(2),
        ),
        ExecutionResult::failed(
            &fail_case,
            vec!["CONTAINS: expected response to contain 'order number', got: 'We cannot find it'"
                .to_string()],
            vec!["CONTAINS".to_string()],
            "We cannot find it".to_string(),
            Duration::from_millis(1),
        ),
        ExecutionResult::blocked(&blocked_case, "no actual response available", Duration::ZERO),
    ]
}

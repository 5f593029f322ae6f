//! Custom assertions for integration tests

use serde_json::Value;

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that JSON output has expected type
pub fn assert_json_type(json: &Value, expected_type: &str) {
    let actual_type = json["_type"]
        .as_str()
        .unwrap_or_else(|| panic!("JSON missing '_type' field"));
    assert_eq!(
        actual_type, expected_type,
        "Expected JSON type '{}' but got '{}'",
        expected_type, actual_type
    );
}

/// Assert that output contains the expected text
pub fn assert_contains(output: &str, expected: &str) {
    assert!(
        output.contains(expected),
        "Expected output to contain '{}'\nOutput:\n{}",
        expected,
        output
    );
}

/// Names of a JSON array of records (or of `{"name": ..}` objects)
pub fn record_names(json: &Value) -> Vec<String> {
    json.as_array()
        .unwrap_or_else(|| panic!("Expected JSON array, got:\n{}", json))
        .iter()
        .filter_map(|r| r["name"].as_str().map(str::to_string))
        .collect()
}

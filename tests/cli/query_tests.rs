//! Tests for the `related` and `collections` CLI commands

use crate::common::{assert_contains, assert_json_type, assert_valid_json, TestVault};

// ============================================================================
// RELATED TESTS
// ============================================================================

#[test]
fn test_related_text() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["related", "rayyan"]);
    assert!(output.starts_with("Rayyan (Boy)"), "{}", output);
    assert_contains(&output, " 35  Zayyan (Boy)");
    assert!(!output.contains("Ayaan"));
    assert!(!output.contains("Aisha"));
}

#[test]
fn test_related_json_with_limit() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["related", "Rayyan", "--limit", "1", "-f", "json"]);
    let json = assert_valid_json(&output, "related json");
    assert_json_type(&json, "related");
    let related = json["related"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["record"]["name"], "Zayyan");
    assert_eq!(related[0]["score"], 35);
}

#[test]
fn test_related_alias_and_unknown_name() {
    let vault = TestVault::new();
    vault.with_sample_names();

    vault.run_cli_success(&["r", "Ali"]);

    let (code, stderr) = vault.run_cli_failure(&["related", "Nobody"]);
    assert_eq!(code, Some(2));
    assert_contains(&stderr, "name not found");
}

// ============================================================================
// COLLECTIONS TESTS
// ============================================================================

#[test]
fn test_collections_text() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["collections", "-v"]);
    assert_contains(&output, "NAMEVAULT COLLECTIONS");
    assert_contains(&output, "sahaba");
    assert_contains(&output, "Aisha, Ali\n");
}

#[test]
fn test_collections_origin_threshold() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["collections", "-f", "json"]);
    let json = assert_valid_json(&output, "collections json");
    assert_json_type(&json, "collections");
    assert_eq!(json["min_members"], 5);
    let origins: Vec<&str> = json["origins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["slug"].as_str().unwrap())
        .collect();
    assert_eq!(origins, vec!["arabic"]);

    let output = vault.run_cli_success(&["collections", "--min-members", "1", "-f", "json"]);
    let json = assert_valid_json(&output, "collections json");
    assert_eq!(json["origins"].as_array().unwrap().len(), 3);
}

#[test]
fn test_collections_theme_membership() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["collections", "-f", "json"]);
    let json = assert_valid_json(&output, "collections json");
    let light = json["themes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["slug"] == "light")
        .unwrap();
    assert_eq!(light["names"], serde_json::json!(["Noor"]));
}

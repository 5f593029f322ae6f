//! Tests for the `organize` and `update` CLI commands
//!
//! Both rewrite the shard directory as one `names_<letter>.json` per bucket.

use serde_json::json;

use crate::common::{assert_contains, assert_json_type, assert_valid_json, record_names, TestVault};

// ============================================================================
// ORGANIZE TESTS
// ============================================================================

#[test]
fn test_organize_reshards_by_letter() {
    let vault = TestVault::new();
    vault
        .add_records("batch1.json", json!([{"name":"Zaid"}, {"name":"ali"}]))
        .add_records("batch2.json", json!([{"name":"Ali","meaning":"High"}, {"name":"7even"}]));

    let output = vault.run_cli_success(&["organize"]);
    assert_contains(&output, "NAMEVAULT ORGANIZE");

    assert_eq!(
        vault.shard_files(),
        vec!["names_a.json", "names_other.json", "names_z.json"]
    );
    let a = vault.read_json("names_data/names_a.json");
    assert_eq!(record_names(&a), vec!["Ali"]);
    assert_eq!(a[0]["meaning"], "High");
}

#[test]
fn test_organize_is_stable() {
    let vault = TestVault::new();
    vault.with_sample_names();

    vault.run_cli_success(&["organize"]);
    let first = vault.read_json("names_data/names_a.json");
    vault.run_cli_success(&["organize"]);
    let second = vault.read_json("names_data/names_a.json");
    assert_eq!(first, second);
}

#[test]
fn test_organize_dry_run() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["organize", "--dry-run", "-f", "json"]);
    let json = assert_valid_json(&output, "organize json");
    assert_json_type(&json, "organize");
    assert_eq!(json["dry_run"], true);
    assert_eq!(
        vault.shard_files(),
        vec!["names_a.json", "names_n.json", "names_r.json"]
    );
}

// ============================================================================
// UPDATE TESTS
// ============================================================================

#[test]
fn test_update_is_first_write_wins() {
    let vault = TestVault::new();
    vault.with_sample_names().add_file(
        "new_names.json",
        r#"[
            {"name": "ali", "meaning": "should not overwrite"},
            {"name": "Amir", "gender": "Boy", "meaning": "Prince"},
            {"name": "Amir", "gender": "Boy", "meaning": "second copy"},
            {"name": "X"},
            {"meaning": "nameless"}
        ]"#,
    );

    let output = vault.run_cli_success(&["update", "-f", "json"]);
    let json = assert_valid_json(&output, "update json");
    assert_json_type(&json, "update");
    assert_eq!(json["update"]["added"], json!([["Amir", "am2"]]));
    assert_eq!(json["update"]["skipped_existing"], json!(["Ali", "Amir"]));
    assert_eq!(json["update"]["rejected"].as_array().unwrap().len(), 2);

    let a = vault.read_json("names_data/names_a.json");
    let ali = a.as_array().unwrap().iter().find(|r| r["name"] == "Ali").unwrap();
    assert_eq!(ali["meaning"], "High, exalted");
    let amir = a.as_array().unwrap().iter().find(|r| r["name"] == "Amir").unwrap();
    assert_eq!(amir["verified"], true);
    assert_eq!(amir["meaning"], "Prince");
}

#[test]
fn test_update_with_explicit_input() {
    let vault = TestVault::new();
    vault
        .with_sample_names()
        .add_file("incoming/batch.json", r#"[{"name":"Basil","gender":"Boy"}]"#);

    let output = vault.run_cli_success(&["update", "incoming/batch.json"]);
    assert_contains(&output, "+ Basil (ba1)");
    assert!(vault.path().join("names_data/names_b.json").exists());
}

#[test]
fn test_update_rejects_non_array_input() {
    let vault = TestVault::new();
    vault
        .with_sample_names()
        .add_file("new_names.json", r#"{"name":"Basil"}"#);

    let (code, stderr) = vault.run_cli_failure(&["update"]);
    assert_eq!(code, Some(2));
    assert_contains(&stderr, "JSON array");
}

#[test]
fn test_update_missing_input() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let (code, _) = vault.run_cli_failure(&["update", "absent.json"]);
    assert_eq!(code, Some(1));
}

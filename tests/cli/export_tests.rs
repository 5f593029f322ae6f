//! Tests for the `export` and `variants` CLI commands

use crate::common::{assert_contains, assert_valid_json, record_names, TestVault};

#[test]
fn test_export_default_path() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["export"]);
    assert_contains(&output, "Exported 8 names");

    let master = vault.read_json("ALL_NAMES_MASTER.json");
    let names = record_names(&master);
    assert_eq!(names.len(), 8);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_export_custom_path() {
    let vault = TestVault::new();
    vault.with_sample_names();

    vault.run_cli_success(&["export", "--output-file", "out/all.json"]);
    assert!(vault.path().join("out/all.json").exists());
}

#[test]
fn test_variants_listing() {
    let vault = TestVault::new();
    vault.add_shard(
        "names_a.json",
        r#"[{"name":"Amina","gender":"Girl","id":"am1"},{"name":"Aminah","gender":"Girl"}]"#,
    );

    let output = vault.run_cli_success(&["variants", "-f", "json"]);
    let json = assert_valid_json(&output, "variants json");
    let names = record_names(&json["variants"]);
    // "Amina" + "h" already exists
    assert!(!names.contains(&"Aminah".to_string()));
    assert!(names.contains(&"Ameena".to_string()));
    assert!(json["written_to"].is_null());
    assert!(!vault.path().join("names_data/generated_variants.json").exists());
}

#[test]
fn test_variants_write_then_merge() {
    let vault = TestVault::new();
    vault.add_shard("names_y.json", r#"[{"name":"Yusuf","gender":"Boy","id":"yu1"}]"#);

    let output = vault.run_cli_success(&["variants", "--write"]);
    assert_contains(&output, "Yoosoof <- Yusuf");

    let build = vault.load();
    let variant = build.dataset.get("yoosoof").unwrap();
    assert_eq!(variant.variant_of.as_deref(), Some("Yusuf"));
    assert_eq!(variant.id.as_deref(), Some("yu1_var"));
}

//! Tests for the `build` CLI command
//!
//! `build` loads the shard directory and writes derived indexes to the output
//! directory without touching the shards.

use crate::common::{assert_contains, assert_json_type, assert_valid_json, record_names, TestVault};

// ============================================================================
// BUILD OUTPUT TESTS
// ============================================================================

#[test]
fn test_build_writes_outputs() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["build", "--date", "2026-05-01"]);
    assert_contains(&output, "NAMEVAULT BUILD");
    assert_contains(&output, "unique_names: 8");

    let dataset = vault.read_json("docs/dataset.json");
    assert_eq!(
        record_names(&dataset),
        vec!["Aisha", "Ali", "Amina", "Ayaan", "Nadia", "Noor", "Rayyan", "Zayyan"]
    );

    let search = vault.read_json("docs/search_index.json");
    assert_eq!(search[0]["n"], "Aisha");
    assert_eq!(search[0]["s"], "name-aisha.html");

    let sitemap = vault.read_json("docs/sitemap.json");
    let entries = sitemap.as_array().unwrap();
    // home + favorites + 4 letter pages + 8 names
    assert_eq!(entries.len(), 14);
    assert_eq!(entries[0]["loc"], "https://muslimnamevault.com/");
    assert_eq!(entries[0]["lastmod"], "2026-05-01");

    let collections = vault.read_json("docs/collections.json");
    assert!(collections["collections"].is_array());
    assert!(collections["themes"].is_array());
    assert!(collections["origins"].is_array());
}

#[test]
fn test_build_writes_related_lists() {
    let vault = TestVault::new();
    vault.with_sample_names();

    vault.run_cli_success(&["build"]);
    let related = vault.read_json("docs/related.json");

    assert_eq!(related.as_object().unwrap().len(), 8);
    assert_eq!(related["Rayyan"][0]["name"], "Zayyan");
    assert_eq!(related["Rayyan"][0]["score"], 35);
    let rayyan: Vec<&str> = related["Rayyan"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(!rayyan.contains(&"Rayyan"));
    assert!(!rayyan.contains(&"Ayaan"));
}

#[test]
fn test_build_json_format() {
    let vault = TestVault::new();
    vault.with_sample_names();

    let output = vault.run_cli_success(&["build", "-f", "json"]);
    let json = assert_valid_json(&output, "build json");
    assert_json_type(&json, "build");
    assert_eq!(json["records"], 8);
    assert_eq!(json["report"]["shards_read"], 3);
}

#[test]
fn test_build_leaves_source_untouched() {
    let vault = TestVault::new();
    vault.with_sample_names();
    let before = vault.shard_files();

    vault.run_cli_success(&["build"]);
    assert_eq!(vault.shard_files(), before);
}

#[test]
fn test_build_skips_corrupt_shard() {
    let vault = TestVault::new();
    vault
        .with_sample_names()
        .add_shard("names_z.json", "{bad");

    let output = vault.run_cli_success(&["build", "-f", "json"]);
    let json = assert_valid_json(&output, "build json");
    assert_eq!(json["records"], 8);
    assert_eq!(json["report"]["shard_failures"].as_array().unwrap().len(), 1);

    let output = vault.run_cli_success(&["build", "-v"]);
    assert_contains(&output, "skipped: 1");
    assert_contains(&output, "Failed to parse shard");
    assert_contains(&output, "names_z.json");
}

#[test]
fn test_build_output_override() {
    let vault = TestVault::new();
    vault.with_sample_names();

    vault.run_cli_success(&["build", "--output", "site"]);
    assert!(vault.path().join("site/dataset.json").exists());
    assert!(!vault.path().join("docs").exists());
}

// ============================================================================
// FAILURE TESTS
// ============================================================================

#[test]
fn test_build_without_shards_fails() {
    let vault = TestVault::new();

    let (code, stderr) = vault.run_cli_failure(&["build"]);
    assert_eq!(code, Some(1));
    assert_contains(&stderr, "No shard files found");
}

#[test]
fn test_build_without_valid_records_fails() {
    let vault = TestVault::new();
    vault.add_shard("names_a.json", r#"[{"meaning":"no name"}]"#);

    let (code, _) = vault.run_cli_failure(&["build"]);
    assert_eq!(code, Some(3));
}

#[test]
fn test_build_with_bad_config_fails() {
    let vault = TestVault::new();
    vault
        .with_sample_names()
        .add_file("namevault.toml", "[logging]\nlevel = \"chatty\"\n");

    let (code, stderr) = vault.run_cli_failure(&["build"]);
    assert_eq!(code, Some(2));
    assert_contains(&stderr, "Invalid log level");
}

#[test]
fn test_build_reads_config_file() {
    let vault = TestVault::new();
    vault
        .with_sample_names()
        .add_file(
            "namevault.toml",
            "[output]\ndir = \"public\"\nsite_url = \"https://example.org/\"\n",
        );

    vault.run_cli_success(&["build"]);
    let sitemap = vault.read_json("public/sitemap.json");
    assert_eq!(sitemap[1]["loc"], "https://example.org/favorites.html");
}

//! TestVault builder for integration testing
//!
//! A temp directory holding a `names_data/` shard directory, plus helpers to
//! run the `namevault` binary against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

use namevault::{Build, Pipeline, VaultConfig};

pub const SOURCE_DIR: &str = "names_data";
pub const OUTPUT_DIR: &str = "docs";

/// Builder for test shard directories
pub struct TestVault {
    dir: TempDir,
}

impl TestVault {
    /// Create a new vault with an empty shard directory
    pub fn new() -> Self {
        let vault = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        fs::create_dir_all(vault.source_dir()).expect("Failed to create source dir");
        vault
    }

    /// Get the path to the vault root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.path().join(SOURCE_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join(OUTPUT_DIR)
    }

    /// Add a shard file with raw content
    pub fn add_shard(&self, file_name: &str, content: &str) -> &Self {
        fs::write(self.source_dir().join(file_name), content).expect("Failed to write shard");
        self
    }

    /// Add a shard holding the given JSON value
    pub fn add_records(&self, file_name: &str, records: Value) -> &Self {
        let content = serde_json::to_string_pretty(&records).expect("Failed to encode shard");
        self.add_shard(file_name, &content)
    }

    /// Add a file relative to the vault root
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Shard file names currently in the source directory, sorted
    pub fn shard_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.source_dir())
            .expect("Failed to read source dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Read a JSON file relative to the vault root
    pub fn read_json(&self, relative_path: &str) -> Value {
        let content =
            fs::read_to_string(self.path().join(relative_path)).expect("Failed to read file");
        serde_json::from_str(&content).expect("Failed to parse JSON")
    }

    /// Config pointing at this vault's directories
    pub fn config(&self) -> VaultConfig {
        let mut config = VaultConfig::default();
        config.source.dir = self.source_dir();
        config.output.dir = self.output_dir();
        config
    }

    /// Run the library pipeline with default settings
    pub fn load(&self) -> Build {
        Pipeline::new(self.config())
            .load()
            .expect("Failed to load vault")
    }

    /// Run namevault CLI command inside the vault root
    pub fn run_cli(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(env!("CARGO_BIN_EXE_namevault"))
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("NAMEVAULT_CONFIG")
            .args(args)
            .output()
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return (exit code, stderr)
    pub fn run_cli_failure(&self, args: &[&str]) -> (Option<i32>, String) {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            !output.status.success(),
            "CLI command {:?} should have failed",
            args
        );
        (
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    // ========================================================================
    // PRE-BUILT VAULTS
    // ========================================================================

    /// A small, varied dataset spread over three shards
    pub fn with_sample_names(&self) -> &Self {
        self.add_records(
            "names_a.json",
            serde_json::json!([
                {"name": "Ali", "gender": "Boy", "meaning": "High, exalted", "origin": "Arabic", "id": "al1"},
                {"name": "Aisha", "gender": "Girl", "meaning": "Alive, living", "origin": "Arabic", "id": "ai1"},
                {"name": "Amina", "gender": "Girl", "meaning": "Trustworthy", "origin": "Arabic", "id": "am1"}
            ]),
        )
        .add_records(
            "names_n.json",
            serde_json::json!([
                {"name": "Noor", "gender": "Unisex", "meaning": "Light", "origin": "Arabic", "id": "no1"},
                {"name": "Nadia", "gender": "Girl", "meaning": "Hope", "origin": "Arabic/Slavic", "id": "na1"}
            ]),
        )
        .add_records(
            "names_r.json",
            serde_json::json!([
                {"name": "Rayyan", "gender": "Boy", "meaning": "Gate of Paradise", "origin": "Arabic", "id": "ra1"},
                {"name": "Zayyan", "gender": "Boy", "meaning": "Adorned", "origin": "Arabic", "id": "za1"},
                {"name": "Ayaan", "gender": "Boy", "meaning": "Gift of God", "origin": "Persian", "id": "ay1"}
            ]),
        )
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

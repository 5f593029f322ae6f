//! Pipeline configuration
//!
//! Loaded from a TOML file (default `namevault.toml` in the working
//! directory). Every field has a default, so a missing file or a partial one
//! is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::fs_utils;
use crate::merge::MergePolicy;
use crate::related::DEFAULT_LIMIT;

/// Default config file name
pub const CONFIG_FILE: &str = "namevault.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VaultConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub related: RelatedConfig,

    #[serde(default)]
    pub origins: OriginsConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where shards live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_source_dir")]
    pub dir: PathBuf,

    /// Shard files are `*.<extension>`
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("names_data")
}

fn default_extension() -> String {
    "json".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
            extension: default_extension(),
        }
    }
}

/// Where derived artifacts go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_site_url() -> String {
    "https://muslimnamevault.com".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            site_url: default_site_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MergeConfig {
    #[serde(default)]
    pub policy: MergePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedConfig {
    #[serde(default = "default_related_limit")]
    pub limit: usize,
}

fn default_related_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OriginsConfig {
    /// Origin groups with fewer members are not published
    #[serde(default = "default_min_members")]
    pub min_members: usize,
}

fn default_min_members() -> usize {
    5
}

impl Default for OriginsConfig {
    fn default() -> Self {
        Self {
            min_members: default_min_members(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Meaning excerpt length in search entries (characters)
    #[serde(default = "default_meaning_chars")]
    pub meaning_chars: usize,
}

fn default_meaning_chars() -> usize {
    60
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            meaning_chars: default_meaning_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl VaultConfig {
    /// Load configuration from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| VaultError::Config {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| VaultError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs_utils::atomic_rename(&temp_path, path)?;

        Ok(())
    }

    /// Reject values no pipeline stage can work with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(VaultError::Config {
                message: format!(
                    "Invalid log level: {}. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        if self.source.extension.trim_start_matches('.').is_empty() {
            return Err(VaultError::Config {
                message: "source.extension must not be empty".to_string(),
            });
        }
        if self.related.limit == 0 {
            return Err(VaultError::Config {
                message: "related.limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

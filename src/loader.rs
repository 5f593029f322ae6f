//! Shard loading
//!
//! Reads every shard file in a source directory and yields raw JSON objects
//! tagged with the file they came from. A shard that cannot be read or parsed
//! is logged and recorded in the [`LoadReport`]; it never stops the others.
//!
//! Shard paths are sorted lexicographically before reading so that merge
//! order, and therefore conflict resolution, is reproducible.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, VaultError};

/// One raw record and where it was read from
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// Shard (or input) file path
    pub source: PathBuf,
    /// Position within the shard
    pub index: usize,
    pub value: Value,
}

/// A shard that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct ShardFailure {
    pub path: PathBuf,
    pub message: String,
}

impl ShardFailure {
    /// The failure as the error it was recorded from
    pub fn to_error(&self) -> VaultError {
        VaultError::ShardParse {
            path: self.path.clone(),
            message: self.message.clone(),
        }
    }
}

/// Result of loading a source directory
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Raw entries in shard order, then in-file order
    pub entries: Vec<RawEntry>,
    /// Shards that parsed successfully (including empty ones)
    pub shards_read: usize,
    /// Shards that were skipped
    pub failures: Vec<ShardFailure>,
}

/// Loads shard files matching `*.<extension>` from a directory
#[derive(Debug, Clone)]
pub struct ShardLoader {
    extension: String,
}

impl Default for ShardLoader {
    fn default() -> Self {
        Self::new("json")
    }
}

impl ShardLoader {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Whether a path matches the shard naming pattern
    pub fn is_shard(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    /// Sorted shard paths in `dir` (non-recursive)
    pub fn shard_paths(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(VaultError::SourceNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| self.is_shard(path))
            .collect();
        paths.sort();

        Ok(paths)
    }

    /// Load every shard in `dir`.
    ///
    /// Fails with [`VaultError::SourceNotFound`] when the directory is missing
    /// or holds no shard files. Per-shard failures are collected, not returned.
    pub fn load_dir(&self, dir: &Path) -> Result<LoadReport> {
        let paths = self.shard_paths(dir)?;
        if paths.is_empty() {
            return Err(VaultError::SourceNotFound {
                path: dir.to_path_buf(),
            });
        }

        tracing::debug!(dir = %dir.display(), shards = paths.len(), "loading shards");

        let mut report = LoadReport::default();
        for path in paths {
            match load_file(&path) {
                Ok(values) => {
                    report.shards_read += 1;
                    report
                        .entries
                        .extend(values.into_iter().enumerate().map(|(index, value)| RawEntry {
                            source: path.clone(),
                            index,
                            value,
                        }));
                }
                Err(e) => {
                    let message = match e {
                        VaultError::ShardParse { message, .. } => message,
                        other => other.to_string(),
                    };
                    tracing::warn!(path = %path.display(), error = %message, "skipping shard");
                    report.failures.push(ShardFailure { path, message });
                }
            }
        }

        Ok(report)
    }
}

/// Read and parse one shard file
pub fn load_file(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|e| VaultError::ShardParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_shard(&content, path)
}

/// Parse shard content: a single object or an array of objects.
///
/// Blank content means "no records". Array elements are returned as-is; the
/// normalizer rejects anything that is not an object.
pub fn parse_shard(content: &str, path: &Path) -> Result<Vec<Value>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| VaultError::ShardParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Array(items) => Ok(items),
        obj @ Value::Object(_) => Ok(vec![obj]),
        other => Err(VaultError::ShardParse {
            path: path.to_path_buf(),
            message: format!("expected an object or array at top level, got {}", other),
        }),
    }
}

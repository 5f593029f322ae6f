//! Shard writer for the organize pass
//!
//! Writes the canonical dataset back to the source directory as one file per
//! letter bucket (`names_a.json`, ..., `names_other.json`) and removes every
//! other shard so the directory holds exactly the canonical layout.
//!
//! This rewrites the source of truth. Only maintenance commands call it; a
//! site build never does.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::fs_utils::write_json_atomic;
use crate::loader::ShardLoader;
use crate::merge::CanonicalDataset;
use crate::schema::Bucket;

/// Statistics about one re-sharding run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShardStats {
    pub files_written: usize,
    pub files_removed: usize,
    pub records_written: usize,
    pub bytes_written: usize,
    /// `(file name, record count)` per written shard
    pub shards: Vec<(String, usize)>,
}

/// Re-shards a dataset into a directory
pub struct ShardWriter {
    dir: PathBuf,
    loader: ShardLoader,
    extension: String,
}

impl ShardWriter {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension: String = extension.into().trim_start_matches('.').to_string();
        Self {
            dir: dir.into(),
            loader: ShardLoader::new(extension.clone()),
            extension,
        }
    }

    /// Shard path for a bucket
    pub fn shard_path(&self, bucket: &Bucket) -> PathBuf {
        self.dir
            .join(format!("names_{}.{}", bucket.file_stem(), self.extension))
    }

    /// Replace all shards in the directory with the dataset's buckets.
    ///
    /// New shards are written first; stale shards are removed afterwards.
    pub fn write_all(&self, dataset: &CanonicalDataset) -> Result<ShardStats> {
        fs::create_dir_all(&self.dir)?;
        let previous = self.loader.shard_paths(&self.dir)?;

        let mut stats = ShardStats::default();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for (bucket, records) in dataset.buckets() {
            if records.is_empty() {
                continue;
            }
            let path = self.shard_path(bucket);
            stats.bytes_written += write_json_atomic(&path, records)?;
            stats.files_written += 1;
            stats.records_written += records.len();
            stats.shards.push((file_name(&path), records.len()));
            written.insert(path);
        }

        for stale in previous.iter().filter(|p| !written.contains(*p)) {
            fs::remove_file(stale)?;
            tracing::debug!(path = %stale.display(), "removed stale shard");
            stats.files_removed += 1;
        }

        tracing::info!(
            dir = %self.dir.display(),
            files = stats.files_written,
            removed = stats.files_removed,
            records = stats.records_written,
            "re-sharded dataset"
        );

        Ok(stats)
    }
}

/// Write the flattened, name-sorted record list to a single file
pub fn export_master_list(dataset: &CanonicalDataset, path: &Path) -> Result<usize> {
    let records = dataset.sorted_records();
    write_json_atomic(path, &records)?;
    Ok(records.len())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

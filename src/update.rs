//! Incremental update mode
//!
//! Applies a batch of new entries to an existing dataset. Unlike a rebuild,
//! existing names are never overwritten: an entry whose key is already
//! present (in the dataset or earlier in the batch) is skipped.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, VaultError};
use crate::ids::{ensure_unused, id_prefix, next_id};
use crate::merge::CanonicalDataset;
use crate::normalize::normalize_record;
use crate::schema::VerifiedDefault;

/// An entry that could not be applied
#[derive(Debug, Clone, Serialize)]
pub struct Rejected {
    pub index: usize,
    pub reason: String,
}

/// Outcome of an update batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    /// `(name, id)` of every added record, in input order
    pub added: Vec<(String, String)>,
    /// Names skipped because they already existed
    pub skipped_existing: Vec<String>,
    pub rejected: Vec<Rejected>,
}

/// Read an update batch: the file must hold a JSON array
pub fn read_update_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(VaultError::validation(format!(
            "{} must contain a JSON array of objects",
            path.display()
        ))),
        Err(e) => Err(VaultError::validation(format!(
            "{} is not valid JSON: {}",
            path.display(),
            e
        ))),
    }
}

/// Apply `entries` to `dataset` with first-write-wins semantics.
///
/// Missing IDs are generated per two-letter prefix. A generated ID that is
/// already in use is a [`VaultError::DuplicateId`] and aborts the batch.
pub fn apply_update(dataset: &mut CanonicalDataset, entries: &[Value]) -> Result<UpdateReport> {
    let mut report = UpdateReport::default();

    for (index, raw) in entries.iter().enumerate() {
        let mut record = match normalize_record(raw, VerifiedDefault::ManualAdd) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(index, error = %e, "rejecting update entry");
                report.rejected.push(Rejected {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let Some(prefix) = id_prefix(&record.name) else {
            report.rejected.push(Rejected {
                index,
                reason: format!("name '{}' is shorter than two characters", record.name),
            });
            continue;
        };

        if dataset.contains(&record.name) {
            tracing::debug!(name = %record.name, "skipping existing name");
            report.skipped_existing.push(record.name);
            continue;
        }

        let id = match record.id.clone() {
            Some(id) => id,
            None => {
                let id = next_id(dataset.iter(), &prefix);
                ensure_unused(dataset.iter(), &id)?;
                id
            }
        };
        record.id = Some(id.clone());

        let name = record.name.clone();
        dataset.insert(record)?;
        tracing::info!(name = %name, id = %id, "added name");
        report.added.push((name, id));
    }

    Ok(report)
}

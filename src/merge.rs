//! Deduplicating merge into the canonical dataset
//!
//! Records are keyed by [`name_key`]: trimmed, whitespace-collapsed and
//! case-folded. When two records share a key the [`MergePolicy`] decides which
//! survives; the loser is dropped entirely (no field-level merging).
//!
//! The merged set is partitioned into first-letter [`Bucket`]s, each sorted by
//! name (ordinal comparison). That ordering is the canonical iteration order
//! used by every derived view.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::normalize::{canonical_name, name_key};
use crate::schema::{Bucket, NameRecord};

/// Conflict rule for records sharing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Later record replaces the earlier one (rebuild mode)
    #[default]
    LastWins,
    /// Earlier record is kept, later duplicates discarded
    FirstWins,
}

/// What happened to a record pushed into the [`Merger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Discarded,
}

/// Counters describing one merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub unique: usize,
    pub replaced: usize,
    pub discarded: usize,
}

/// Accumulates normalized records and resolves duplicates
#[derive(Debug, Default)]
pub struct Merger {
    policy: MergePolicy,
    by_key: HashMap<String, NameRecord>,
    stats: MergeStats,
}

impl Merger {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            by_key: HashMap::new(),
            stats: MergeStats::default(),
        }
    }

    /// Add one record, applying the conflict policy
    pub fn push(&mut self, mut record: NameRecord) -> MergeOutcome {
        record.name = canonical_name(&record.name);
        let key = name_key(&record.name);

        match self.by_key.get_mut(&key) {
            None => {
                self.by_key.insert(key, record);
                MergeOutcome::Inserted
            }
            Some(existing) => match self.policy {
                MergePolicy::LastWins => {
                    *existing = record;
                    self.stats.replaced += 1;
                    MergeOutcome::Replaced
                }
                MergePolicy::FirstWins => {
                    self.stats.discarded += 1;
                    MergeOutcome::Discarded
                }
            },
        }
    }

    /// Partition into letter buckets and sort
    pub fn finish(self) -> (CanonicalDataset, MergeStats) {
        let mut stats = self.stats;
        stats.unique = self.by_key.len();

        let mut buckets: BTreeMap<Bucket, Vec<NameRecord>> = BTreeMap::new();
        for record in self.by_key.into_values() {
            buckets.entry(record.bucket()).or_default().push(record);
        }
        for records in buckets.values_mut() {
            records.sort_by(|a, b| a.name.cmp(&b.name));
        }

        (CanonicalDataset { buckets }, stats)
    }
}

/// The deduplicated, letter-bucketed collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalDataset {
    buckets: BTreeMap<Bucket, Vec<NameRecord>>,
}

impl CanonicalDataset {
    /// Merge records in iteration order under `policy`
    pub fn from_records<I>(records: I, policy: MergePolicy) -> (Self, MergeStats)
    where
        I: IntoIterator<Item = NameRecord>,
    {
        let mut merger = Merger::new(policy);
        for record in records {
            merger.push(record);
        }
        merger.finish()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Buckets present, in canonical order
    pub fn letters(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.keys()
    }

    pub fn buckets(&self) -> btree_map::Iter<'_, Bucket, Vec<NameRecord>> {
        self.buckets.iter()
    }

    /// Records in one bucket (empty if the bucket is absent)
    pub fn bucket(&self, bucket: &Bucket) -> &[NameRecord] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All records in canonical iteration order
    pub fn iter(&self) -> impl Iterator<Item = &NameRecord> {
        self.buckets.values().flatten()
    }

    /// All records, globally sorted by name
    pub fn sorted_records(&self) -> Vec<&NameRecord> {
        let mut all: Vec<&NameRecord> = self.iter().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Case- and whitespace-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&NameRecord> {
        let name = canonical_name(name);
        let records = self.buckets.get(&Bucket::for_name(&name))?;
        records
            .binary_search_by(|r| r.name.as_str().cmp(&name))
            .ok()
            .map(|i| &records[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a new record; fails if its key already exists
    pub fn insert(&mut self, mut record: NameRecord) -> Result<()> {
        record.name = canonical_name(&record.name);
        if record.name.is_empty() {
            return Err(VaultError::validation("'name' is empty"));
        }

        let records = self.buckets.entry(record.bucket()).or_default();
        match records.binary_search_by(|r| r.name.cmp(&record.name)) {
            Ok(_) => Err(VaultError::DuplicateName { name: record.name }),
            Err(pos) => {
                records.insert(pos, record);
                Ok(())
            }
        }
    }

    /// Replace the record sharing `record`'s key, or insert it.
    ///
    /// Returns the previous record when one was replaced.
    pub fn replace(&mut self, mut record: NameRecord) -> Result<Option<NameRecord>> {
        record.name = canonical_name(&record.name);
        if record.name.is_empty() {
            return Err(VaultError::validation("'name' is empty"));
        }

        let records = self.buckets.entry(record.bucket()).or_default();
        match records.binary_search_by(|r| r.name.cmp(&record.name)) {
            Ok(pos) => Ok(Some(std::mem::replace(&mut records[pos], record))),
            Err(pos) => {
                records.insert(pos, record);
                Ok(None)
            }
        }
    }
}

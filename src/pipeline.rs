//! Build pipeline: load → normalize → merge → derive
//!
//! A [`Pipeline`] owns its [`VaultConfig`]; nothing is read from process-wide
//! state. Loading either produces a complete [`CanonicalDataset`] (some shards
//! or records possibly skipped, all listed in the [`BuildReport`]) or fails
//! before anything is returned.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::collections::{
    resolve_collection, resolve_theme, OriginGroups, COLLECTIONS, THEMES,
};
use crate::config::VaultConfig;
use crate::derived::{search_index, sitemap_entries, SearchEntry, SitemapEntry};
use crate::error::{Result, VaultError};
use crate::loader::{ShardFailure, ShardLoader};
use crate::merge::{CanonicalDataset, MergeOutcome, MergeStats, Merger};
use crate::normalize::normalize_record;
use crate::related::{related_names, RelatedName};
use crate::schema::{NameRecord, VerifiedDefault};

/// A record rejected by the normalizer
#[derive(Debug, Clone, Serialize)]
pub struct RecordSkip {
    pub source: PathBuf,
    pub index: usize,
    pub reason: String,
}

/// What happened during a load
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub shards_read: usize,
    #[serde(serialize_with = "serialize_failures")]
    pub shard_failures: Vec<ShardFailure>,
    pub records_seen: usize,
    pub skipped_records: Vec<RecordSkip>,
    pub merge: MergeStats,
}

impl BuildReport {
    /// Shards plus records that were skipped
    pub fn skipped_count(&self) -> usize {
        self.shard_failures.len() + self.skipped_records.len()
    }
}

fn serialize_failures<S: Serializer>(
    failures: &[ShardFailure],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(|f| {
        serde_json::json!({
            "path": f.path.display().to_string(),
            "message": f.message,
        })
    }))
}

/// Loaded dataset and its report
#[derive(Debug)]
pub struct Build {
    pub dataset: CanonicalDataset,
    pub report: BuildReport,
}

/// A named subset of the dataset (collection, theme or origin group)
#[derive(Debug, Clone, Serialize)]
pub struct Subset<'a> {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "names", serialize_with = "serialize_names")]
    pub members: Vec<&'a NameRecord>,
}

fn serialize_names<S: Serializer>(
    members: &[&NameRecord],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(members.iter().map(|r| r.name.as_str()))
}

/// Collections, themes and origin groups
#[derive(Debug, Clone, Serialize)]
pub struct Subsets<'a> {
    pub collections: Vec<Subset<'a>>,
    pub themes: Vec<Subset<'a>>,
    pub origins: Vec<Subset<'a>>,
}

/// Everything the renderer needs besides the dataset itself
#[derive(Debug, Serialize)]
pub struct SiteViews<'a> {
    #[serde(flatten)]
    pub subsets: Subsets<'a>,
    pub related: BTreeMap<String, Vec<RelatedName<'a>>>,
    pub search: Vec<SearchEntry>,
    pub sitemap: Vec<SitemapEntry>,
}

/// Sequential, single-threaded build pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: VaultConfig,
}

impl Pipeline {
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Load the configured source directory
    pub fn load(&self) -> Result<Build> {
        self.load_from(&self.config.source.dir)
    }

    /// Load shards from `dir` and merge them into the canonical dataset
    pub fn load_from(&self, dir: &Path) -> Result<Build> {
        let loader = ShardLoader::new(self.config.source.extension.clone());
        let loaded = loader.load_dir(dir)?;

        let mut report = BuildReport {
            shards_read: loaded.shards_read,
            shard_failures: loaded.failures,
            records_seen: loaded.entries.len(),
            ..Default::default()
        };

        let mut merger = Merger::new(self.config.merge.policy);
        for entry in loaded.entries {
            match normalize_record(&entry.value, VerifiedDefault::Import) {
                Ok(record) => {
                    let name = record.name.clone();
                    match merger.push(record) {
                        MergeOutcome::Replaced => tracing::debug!(
                            name = %name,
                            source = %entry.source.display(),
                            "duplicate replaced earlier record"
                        ),
                        MergeOutcome::Discarded => tracing::debug!(
                            name = %name,
                            source = %entry.source.display(),
                            "duplicate discarded"
                        ),
                        MergeOutcome::Inserted => {}
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        source = %entry.source.display(),
                        index = entry.index,
                        error = %e,
                        "skipping record"
                    );
                    report.skipped_records.push(RecordSkip {
                        source: entry.source,
                        index: entry.index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let (dataset, merge) = merger.finish();
        report.merge = merge;

        if dataset.is_empty() {
            return Err(VaultError::NoRecords {
                path: dir.to_path_buf(),
            });
        }

        tracing::info!(
            shards = report.shards_read,
            records = dataset.len(),
            skipped = report.skipped_count(),
            "loaded canonical dataset"
        );

        Ok(Build { dataset, report })
    }

    /// Related names for `record` using the configured limit
    pub fn related<'a>(
        &self,
        record: &NameRecord,
        dataset: &'a CanonicalDataset,
    ) -> Vec<RelatedName<'a>> {
        related_names(record, dataset, self.config.related.limit)
    }

    /// Curated collections, keyword themes and publishable origin groups
    pub fn subsets<'a>(&self, dataset: &'a CanonicalDataset) -> Subsets<'a> {
        let collections = COLLECTIONS
            .iter()
            .map(|spec| Subset {
                slug: spec.slug.to_string(),
                title: spec.title.to_string(),
                description: spec.description.to_string(),
                members: resolve_collection(spec, dataset),
            })
            .collect();

        let themes = THEMES
            .iter()
            .map(|spec| Subset {
                slug: spec.slug.to_string(),
                title: spec.title.to_string(),
                description: format!("Names with meanings related to {}", spec.title.to_lowercase()),
                members: resolve_theme(spec, dataset),
            })
            .collect();

        let groups = OriginGroups::build(dataset);
        let origins = groups
            .publishable(self.config.origins.min_members)
            .map(|(origin, members)| Subset {
                slug: origin.to_lowercase().replace(' ', "-"),
                title: format!("{} Names", origin),
                description: format!("Names of {} origin", origin),
                members: members.to_vec(),
            })
            .collect();

        Subsets {
            collections,
            themes,
            origins,
        }
    }

    /// Related names of every record, keyed by name. Quadratic in dataset size.
    pub fn related_index<'a>(
        &self,
        dataset: &'a CanonicalDataset,
    ) -> BTreeMap<String, Vec<RelatedName<'a>>> {
        dataset
            .iter()
            .map(|r| (r.name.clone(), self.related(r, dataset)))
            .collect()
    }

    /// Derive every view the site renderer consumes
    pub fn derive<'a>(&self, dataset: &'a CanonicalDataset, today: NaiveDate) -> SiteViews<'a> {
        SiteViews {
            subsets: self.subsets(dataset),
            related: self.related_index(dataset),
            search: search_index(dataset, self.config.search.meaning_chars),
            sitemap: sitemap_entries(dataset, &self.config.output.site_url, today),
        }
    }
}

//! namevault: data pipeline for a static name-directory site
//!
//! Loads per-letter JSON shards of name records, normalizes and deduplicates
//! them into one canonical dataset, and derives the views a site renderer
//! needs: related names, curated collections, meaning themes, origin groups,
//! a search index and sitemap entries.
//!
//! # Pipeline
//!
//! ```text
//! shards ──► ShardLoader ──► normalize_record ──► Merger ──► CanonicalDataset
//!                                                              │
//!                          related_names / collections / derived indexes
//! ```
//!
//! # Example
//!
//! ```no_run
//! use namevault::{Pipeline, VaultConfig};
//!
//! let pipeline = Pipeline::new(VaultConfig::default());
//! let build = pipeline.load()?;
//! if let Some(ali) = build.dataset.get("ali") {
//!     for related in pipeline.related(ali, &build.dataset) {
//!         println!("{} ({})", related.record.name, related.score);
//!     }
//! }
//! # Ok::<(), namevault::VaultError>(())
//! ```

pub mod cli;
pub mod collections;
pub mod commands;
pub mod config;
pub mod derived;
pub mod error;
pub mod fs_utils;
pub mod ids;
pub mod loader;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod related;
pub mod schema;
pub mod shard;
pub mod update;
pub mod variants;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use collections::{
    resolve_collection, resolve_theme, CollectionSpec, OriginGroups, ThemeSpec, COLLECTIONS,
    THEMES,
};
pub use config::VaultConfig;
pub use derived::{
    name_slug, search_index, sitemap_entries, slug_collisions, SearchEntry, SitemapEntry,
};
pub use error::{Result, VaultError};
pub use ids::{id_prefix, next_id};
pub use loader::{LoadReport, ShardLoader};
pub use merge::{CanonicalDataset, MergePolicy, MergeStats, Merger};
pub use normalize::{canonical_name, name_key, normalize_record};
pub use pipeline::{Build, BuildReport, Pipeline, SiteViews, Subsets};
pub use related::{related_names, RelatedName};
pub use schema::{Bucket, Gender, NameRecord, VerifiedDefault};
pub use shard::{export_master_list, ShardWriter};
pub use update::{apply_update, UpdateReport};
pub use variants::expand_variants;

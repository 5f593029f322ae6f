//! Derived indexes consumed by the site renderer
//!
//! The search index feeds the client-side search box; sitemap entries list
//! every page URL. Both are built from the canonical dataset only. Turning
//! them into XML or HTML is left to the renderer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::merge::CanonicalDataset;
use crate::schema::{Bucket, Gender, NameRecord};

/// URL slug of a name's detail page ("Abu Bakr" -> "name-abu-bakr")
pub fn name_slug(name: &str) -> String {
    format!("name-{}", name.trim().to_lowercase().replace(' ', "-"))
}

/// Page file of a letter listing ("names-a.html", "names-other.html")
pub fn letter_page(bucket: &Bucket) -> String {
    format!("names-{}.html", bucket.file_stem())
}

/// One search-box entry; short keys keep the JSON small
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    /// Name
    pub n: String,
    /// Detail page file
    pub s: String,
    /// Meaning excerpt
    pub m: String,
    /// Gender
    pub g: Gender,
}

impl SearchEntry {
    pub fn from_record(record: &NameRecord, meaning_chars: usize) -> Self {
        Self {
            n: record.name.clone(),
            s: format!("{}.html", name_slug(&record.name)),
            m: record.meaning.chars().take(meaning_chars).collect(),
            g: record.gender,
        }
    }
}

/// Slugs shared by more than one record, with the names that share them.
///
/// Distinct names can map to one page ("Abu Bakr", "Abu-Bakr"); the later
/// page overwrites the earlier one when rendered.
pub fn slug_collisions(dataset: &CanonicalDataset) -> Vec<(String, Vec<&str>)> {
    let mut by_slug: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for record in dataset.sorted_records() {
        by_slug
            .entry(name_slug(&record.name))
            .or_default()
            .push(record.name.as_str());
    }
    by_slug
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .collect()
}

fn warn_slug_collisions(dataset: &CanonicalDataset, index: &str) {
    for (slug, names) in slug_collisions(dataset) {
        tracing::warn!(
            slug = %slug,
            names = %names.join(", "),
            index,
            "several names share one page slug"
        );
    }
}

/// Search entries for every record, sorted by name
pub fn search_index(dataset: &CanonicalDataset, meaning_chars: usize) -> Vec<SearchEntry> {
    warn_slug_collisions(dataset, "search");
    dataset
        .sorted_records()
        .into_iter()
        .map(|r| SearchEntry::from_record(r, meaning_chars))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Sitemap entries: home, favorites, each present letter page, each name page
pub fn sitemap_entries(
    dataset: &CanonicalDataset,
    site_url: &str,
    lastmod: NaiveDate,
) -> Vec<SitemapEntry> {
    warn_slug_collisions(dataset, "sitemap");
    let base = site_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let entry = |path: &str, changefreq, priority| SitemapEntry {
        loc: format!("{}/{}", base, path),
        lastmod: lastmod.clone(),
        changefreq,
        priority,
    };

    let mut entries = vec![
        entry("", ChangeFreq::Daily, 1.0),
        entry("favorites.html", ChangeFreq::Weekly, 0.8),
    ];

    entries.extend(
        dataset
            .letters()
            .map(|bucket| entry(&letter_page(bucket), ChangeFreq::Weekly, 0.8)),
    );

    entries.extend(dataset.sorted_records().into_iter().map(|r| {
        entry(
            &format!("{}.html", name_slug(&r.name)),
            ChangeFreq::Monthly,
            0.6,
        )
    }));

    entries
}

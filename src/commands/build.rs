//! Build command handler - Load shards and write derived indexes

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::BuildArgs;
use crate::commands::{header, CommandContext};
use crate::error::{Result, VaultError};
use crate::fs_utils::write_json_atomic;
use crate::pipeline::{BuildReport, Pipeline};

pub const DATASET_FILE: &str = "dataset.json";
pub const SEARCH_INDEX_FILE: &str = "search_index.json";
pub const SITEMAP_FILE: &str = "sitemap.json";
pub const COLLECTIONS_FILE: &str = "collections.json";
pub const RELATED_FILE: &str = "related.json";

/// One related name as written to `related.json`
#[derive(Serialize)]
struct RelatedEntry<'a> {
    name: &'a str,
    score: u32,
}

#[derive(Serialize)]
struct BuildSummary<'r> {
    #[serde(rename = "_type")]
    kind: &'static str,
    output_dir: String,
    records: usize,
    letters: usize,
    files: Vec<(String, usize)>,
    report: &'r BuildReport,
}

/// Run the build command. Never writes to the source directory.
pub fn run_build(args: &BuildArgs, ctx: &CommandContext) -> Result<String> {
    let today = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    let pipeline = Pipeline::new(ctx.config.clone());
    let build = pipeline.load()?;
    let views = pipeline.derive(&build.dataset, today);

    let out_dir = &ctx.config.output.dir;
    fs::create_dir_all(out_dir)?;

    let mut files = Vec::new();
    let mut write = |name: &str, bytes: usize| files.push((name.to_string(), bytes));

    write(
        DATASET_FILE,
        write_json_atomic(&out_dir.join(DATASET_FILE), &build.dataset.sorted_records())?,
    );
    write(
        SEARCH_INDEX_FILE,
        write_json_atomic(&out_dir.join(SEARCH_INDEX_FILE), &views.search)?,
    );
    write(
        SITEMAP_FILE,
        write_json_atomic(&out_dir.join(SITEMAP_FILE), &views.sitemap)?,
    );
    write(
        COLLECTIONS_FILE,
        write_json_atomic(&out_dir.join(COLLECTIONS_FILE), &views.subsets)?,
    );

    let related: BTreeMap<&str, Vec<RelatedEntry<'_>>> = views
        .related
        .iter()
        .map(|(name, list)| {
            let entries = list
                .iter()
                .map(|r| RelatedEntry {
                    name: &r.record.name,
                    score: r.score,
                })
                .collect();
            (name.as_str(), entries)
        })
        .collect();
    write(
        RELATED_FILE,
        write_json_atomic(&out_dir.join(RELATED_FILE), &related)?,
    );

    tracing::info!(
        output = %out_dir.display(),
        records = build.dataset.len(),
        files = files.len(),
        "build complete"
    );

    let summary = BuildSummary {
        kind: "build",
        output_dir: out_dir.display().to_string(),
        records: build.dataset.len(),
        letters: build.dataset.letters().count(),
        files,
        report: &build.report,
    };

    ctx.render(&summary, || format_text(&summary, out_dir, ctx.verbose))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| VaultError::validation(format!("invalid --date '{}': {}", raw, e)))
}

fn format_text(summary: &BuildSummary<'_>, out_dir: &Path, verbose: bool) -> String {
    let report = summary.report;
    let mut output = header("NAMEVAULT BUILD");

    output.push_str(&format!("output: {}\n", out_dir.display()));
    output.push_str(&format!("shards_read: {}\n", report.shards_read));
    output.push_str(&format!("records_seen: {}\n", report.records_seen));
    output.push_str(&format!("unique_names: {}\n", summary.records));
    output.push_str(&format!("letters: {}\n", summary.letters));
    output.push_str(&format!(
        "duplicates: {} replaced, {} discarded\n",
        report.merge.replaced, report.merge.discarded
    ));
    output.push_str(&format!("skipped: {}\n\n", report.skipped_count()));

    output.push_str("files:\n");
    for (name, bytes) in &summary.files {
        output.push_str(&format!("  {} ({} bytes)\n", name, bytes));
    }

    if verbose && report.skipped_count() > 0 {
        output.push_str("\nskipped:\n");
        for failure in &report.shard_failures {
            output.push_str(&format!("  {}\n", failure.to_error()));
        }
        for skip in &report.skipped_records {
            output.push_str(&format!(
                "  {}[{}]: {}\n",
                skip.source.display(),
                skip.index,
                skip.reason
            ));
        }
    }

    output
}

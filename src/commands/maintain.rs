//! Maintenance command handlers - Rewrite the shard directory
//!
//! `organize` rebuilds the canonical dataset and writes it back as one shard
//! per letter. `update` adds new names first and then re-shards the same way.
//! Both are destructive on the source directory; `--dry-run` skips the write.

use serde::Serialize;

use crate::cli::{OrganizeArgs, UpdateArgs};
use crate::commands::{header, CommandContext};
use crate::error::Result;
use crate::merge::CanonicalDataset;
use crate::pipeline::Pipeline;
use crate::shard::{ShardStats, ShardWriter};
use crate::update::{apply_update, read_update_file, UpdateReport};

#[derive(Serialize)]
struct OrganizeSummary {
    #[serde(rename = "_type")]
    kind: &'static str,
    dry_run: bool,
    records: usize,
    shards: ShardStats,
}

#[derive(Serialize)]
struct UpdateSummary {
    #[serde(rename = "_type")]
    kind: &'static str,
    dry_run: bool,
    records: usize,
    update: UpdateReport,
    shards: Option<ShardStats>,
}

/// Run the organize command
pub fn run_organize(args: &OrganizeArgs, ctx: &CommandContext) -> Result<String> {
    let pipeline = Pipeline::new(ctx.config.clone());
    let build = pipeline.load()?;

    let shards = if args.dry_run {
        planned_shards(&writer(ctx), &build.dataset)
    } else {
        writer(ctx).write_all(&build.dataset)?
    };

    let summary = OrganizeSummary {
        kind: "organize",
        dry_run: args.dry_run,
        records: build.dataset.len(),
        shards,
    };

    ctx.render(&summary, || {
        let mut output = header("NAMEVAULT ORGANIZE");
        if summary.dry_run {
            output.push_str("dry run: nothing written\n");
        }
        output.push_str(&format!("unique_names: {}\n", summary.records));
        output.push_str(&format!(
            "duplicates_merged: {}\n",
            build.report.merge.replaced + build.report.merge.discarded
        ));
        output.push_str(&format_shards(&summary.shards));
        output
    })
}

/// Run the update command
pub fn run_update(args: &UpdateArgs, ctx: &CommandContext) -> Result<String> {
    let entries = read_update_file(&args.input)?;

    let pipeline = Pipeline::new(ctx.config.clone());
    let mut dataset = pipeline.load()?.dataset;
    let update = apply_update(&mut dataset, &entries)?;

    let shards = if args.dry_run || update.added.is_empty() {
        None
    } else {
        Some(writer(ctx).write_all(&dataset)?)
    };

    tracing::info!(
        input = %args.input.display(),
        added = update.added.len(),
        skipped = update.skipped_existing.len(),
        rejected = update.rejected.len(),
        "update applied"
    );

    let summary = UpdateSummary {
        kind: "update",
        dry_run: args.dry_run,
        records: dataset.len(),
        update,
        shards,
    };

    ctx.render(&summary, || {
        let mut output = header("NAMEVAULT UPDATE");
        if summary.dry_run {
            output.push_str("dry run: nothing written\n");
        }
        output.push_str(&format!("added: {}\n", summary.update.added.len()));
        for (name, id) in &summary.update.added {
            output.push_str(&format!("  + {} ({})\n", name, id));
        }
        output.push_str(&format!(
            "skipped_existing: {}\n",
            summary.update.skipped_existing.len()
        ));
        if ctx.verbose {
            for name in &summary.update.skipped_existing {
                output.push_str(&format!("  = {}\n", name));
            }
        }
        output.push_str(&format!("rejected: {}\n", summary.update.rejected.len()));
        for rejected in &summary.update.rejected {
            output.push_str(&format!("  ! [{}] {}\n", rejected.index, rejected.reason));
        }
        output.push_str(&format!("total_names: {}\n", summary.records));
        if let Some(shards) = &summary.shards {
            output.push_str(&format_shards(shards));
        }
        output
    })
}

fn writer(ctx: &CommandContext) -> ShardWriter {
    ShardWriter::new(
        ctx.config.source.dir.clone(),
        ctx.config.source.extension.clone(),
    )
}

/// What `write_all` would produce, without touching the disk
fn planned_shards(writer: &ShardWriter, dataset: &CanonicalDataset) -> ShardStats {
    let mut stats = ShardStats::default();
    for (bucket, records) in dataset.buckets() {
        let name = writer
            .shard_path(bucket)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        stats.files_written += 1;
        stats.records_written += records.len();
        stats.shards.push((name, records.len()));
    }
    stats
}

fn format_shards(stats: &ShardStats) -> String {
    let mut output = format!(
        "\nshards: {} written, {} removed\n",
        stats.files_written, stats.files_removed
    );
    for (name, count) in &stats.shards {
        output.push_str(&format!("  {}: {} names\n", name, count));
    }
    output
}

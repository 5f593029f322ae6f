//! Export command handlers - Master list and spelling variants

use serde::Serialize;

use crate::cli::{ExportArgs, VariantsArgs};
use crate::commands::{header, CommandContext};
use crate::error::Result;
use crate::fs_utils::write_json_atomic;
use crate::pipeline::Pipeline;
use crate::schema::NameRecord;
use crate::shard::export_master_list;
use crate::variants::expand_variants;

/// File name used by `variants --write`, inside the source directory
pub const VARIANTS_FILE: &str = "generated_variants";

#[derive(Serialize)]
struct ExportSummary {
    #[serde(rename = "_type")]
    kind: &'static str,
    path: String,
    records: usize,
}

#[derive(Serialize)]
struct VariantsSummary<'a> {
    #[serde(rename = "_type")]
    kind: &'static str,
    written_to: Option<String>,
    variants: &'a [NameRecord],
}

/// Run the export command
pub fn run_export(args: &ExportArgs, ctx: &CommandContext) -> Result<String> {
    let build = Pipeline::new(ctx.config.clone()).load()?;
    let records = export_master_list(&build.dataset, &args.output_file)?;

    tracing::info!(path = %args.output_file.display(), records, "exported master list");

    let summary = ExportSummary {
        kind: "export",
        path: args.output_file.display().to_string(),
        records,
    };
    ctx.render(&summary, || {
        format!("Exported {} names to {}\n", summary.records, summary.path)
    })
}

/// Run the variants command
pub fn run_variants(args: &VariantsArgs, ctx: &CommandContext) -> Result<String> {
    let build = Pipeline::new(ctx.config.clone()).load()?;
    let variants = expand_variants(&build.dataset);

    // Written with the shard extension so the next load merges them in
    let written_to = if args.write {
        let path = ctx.config.source.dir.join(format!(
            "{}.{}",
            VARIANTS_FILE,
            ctx.config.source.extension.trim_start_matches('.')
        ));
        write_json_atomic(&path, &variants)?;
        tracing::info!(path = %path.display(), variants = variants.len(), "wrote variants");
        Some(path.display().to_string())
    } else {
        None
    };

    let summary = VariantsSummary {
        kind: "variants",
        written_to,
        variants: &variants,
    };

    ctx.render(&summary, || {
        let mut output = header("NAMEVAULT VARIANTS");
        output.push_str(&format!("variants: {}\n", summary.variants.len()));
        for variant in summary.variants {
            output.push_str(&format!(
                "  {} <- {}\n",
                variant.name,
                variant.variant_of.as_deref().unwrap_or("?")
            ));
        }
        if let Some(path) = &summary.written_to {
            output.push_str(&format!("\nwritten_to: {}\n", path));
        }
        output
    })
}

//! Query command handlers - Related names and collection listings

use serde::Serialize;

use crate::cli::{CollectionsArgs, RelatedArgs};
use crate::commands::{header, CommandContext};
use crate::error::{Result, VaultError};
use crate::pipeline::{Pipeline, Subset};
use crate::related::{related_names, RelatedName};

#[derive(Serialize)]
struct RelatedOutput<'a> {
    #[serde(rename = "_type")]
    kind: &'static str,
    name: &'a str,
    gender: &'static str,
    related: Vec<RelatedName<'a>>,
}

#[derive(Serialize)]
struct CollectionsOutput<'v, 'a> {
    #[serde(rename = "_type")]
    kind: &'static str,
    min_members: usize,
    collections: &'v [Subset<'a>],
    themes: &'v [Subset<'a>],
    origins: &'v [Subset<'a>],
}

/// Run the related command
pub fn run_related(args: &RelatedArgs, ctx: &CommandContext) -> Result<String> {
    let build = Pipeline::new(ctx.config.clone()).load()?;
    let target = build
        .dataset
        .get(&args.name)
        .ok_or_else(|| VaultError::validation(format!("name not found: {}", args.name.trim())))?;

    let limit = args.limit.unwrap_or(ctx.config.related.limit);
    let output = RelatedOutput {
        kind: "related",
        name: &target.name,
        gender: target.gender.as_str(),
        related: related_names(target, &build.dataset, limit),
    };

    ctx.render(&output, || {
        let mut text = format!("{} ({})\n", output.name, output.gender);
        if output.related.is_empty() {
            text.push_str("  no related names\n");
        }
        for related in &output.related {
            text.push_str(&format!(
                "  {:>3}  {} ({})\n",
                related.score,
                related.record.name,
                related.record.gender.as_str()
            ));
        }
        text
    })
}

/// Run the collections command
pub fn run_collections(args: &CollectionsArgs, ctx: &CommandContext) -> Result<String> {
    let mut config = ctx.config.clone();
    if let Some(min) = args.min_members {
        config.origins.min_members = min;
    }
    let min_members = config.origins.min_members;

    let pipeline = Pipeline::new(config);
    let build = pipeline.load()?;
    let subsets = pipeline.subsets(&build.dataset);

    let output = CollectionsOutput {
        kind: "collections",
        min_members,
        collections: &subsets.collections,
        themes: &subsets.themes,
        origins: &subsets.origins,
    };

    ctx.render(&output, || {
        let mut text = header("NAMEVAULT COLLECTIONS");
        for (title, subsets) in [
            ("collections", output.collections),
            ("themes", output.themes),
            ("origins", output.origins),
        ] {
            text.push_str(&format!("{}:\n", title));
            if subsets.is_empty() {
                text.push_str("  (none)\n");
            }
            for subset in subsets {
                text.push_str(&format!(
                    "  {:<12} {:>5}  {}\n",
                    subset.slug,
                    subset.members.len(),
                    subset.title
                ));
                if ctx.verbose {
                    let names: Vec<&str> =
                        subset.members.iter().map(|r| r.name.as_str()).collect();
                    text.push_str(&format!("               {}\n", names.join(", ")));
                }
            }
            text.push('\n');
        }
        text
    })
}

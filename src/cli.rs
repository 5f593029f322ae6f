//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{VaultConfig, CONFIG_FILE};
use crate::error::Result;

/// Name directory pipeline
#[derive(Parser, Debug)]
#[command(name = "namevault")]
#[command(about = "Merge name shards into a canonical dataset and derive site indexes")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", global = true, env = "NAMEVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Shard directory (overrides source.dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Output directory (overrides output.dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<VaultConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| Path::new(CONFIG_FILE).to_path_buf());
        let mut config = VaultConfig::load_from(&path)?;

        if let Some(source) = &self.source {
            config.source.dir = source.clone();
        }
        if let Some(output) = &self.output {
            config.output.dir = output.clone();
        }

        Ok(config)
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and merge shards, then write derived indexes to the output directory
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// Rewrite the shard directory as one sorted file per letter
    Organize(OrganizeArgs),

    /// Add new names from a JSON file without overwriting existing ones
    Update(UpdateArgs),

    /// Export every record to a single JSON file
    Export(ExportArgs),

    /// Show related names for a name
    #[command(visible_alias = "r")]
    Related(RelatedArgs),

    /// Show curated collections, themes and origin groups
    Collections(CollectionsArgs),

    /// Generate spelling variants of existing names
    Variants(VariantsArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Date stamped on sitemap entries (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
}

/// Arguments for the organize command
#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Report what would be written without touching the shard directory
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// JSON file holding an array of new records
    #[arg(value_name = "INPUT", default_value = "new_names.json")]
    pub input: PathBuf,

    /// Report what would be added without writing shards
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file
    #[arg(long, value_name = "FILE", default_value = "ALL_NAMES_MASTER.json")]
    pub output_file: PathBuf,
}

/// Arguments for the related command
#[derive(Args, Debug)]
pub struct RelatedArgs {
    /// Name to find related names for
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Maximum results (overrides related.limit)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for the collections command
#[derive(Args, Debug)]
pub struct CollectionsArgs {
    /// Minimum members for an origin group (overrides origins.min_members)
    #[arg(long, value_name = "N")]
    pub min_members: Option<usize>,
}

/// Arguments for the variants command
#[derive(Args, Debug)]
pub struct VariantsArgs {
    /// Save variants to <source>/generated_variants.json
    #[arg(long)]
    pub write: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

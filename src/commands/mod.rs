//! Command modules for the namevault CLI
//!
//! Each module implements one or more top-level commands:
//! - `build` - Load shards and write derived indexes to the output directory
//! - `maintain` - Source-rewriting commands (`organize`, `update`)
//! - `export` - Master list and spelling variant output (`export`, `variants`)
//! - `query` - Read-only lookups (`related`, `collections`)
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` carrying the resolved configuration, output
//! format and verbosity. Handlers return the text to print.

pub mod build;
pub mod export;
pub mod maintain;
pub mod query;

pub use build::run_build;
pub use export::{run_export, run_variants};
pub use maintain::{run_organize, run_update};
pub use query::{run_collections, run_related};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::VaultConfig;
use crate::error::Result;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Resolved configuration (file plus command-line overrides)
    pub config: VaultConfig,
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn new(config: VaultConfig, format: OutputFormat, verbose: bool) -> Self {
        Self {
            config,
            format,
            verbose,
        }
    }

    /// Render `value` as JSON, or fall back to the text renderer
    pub fn render<T, F>(&self, value: &T, text: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        match self.format {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Text => Ok(text()),
        }
    }
}

/// Section header used by text output
pub(crate) fn header(title: &str) -> String {
    let rule = "═".repeat(55);
    format!("{rule}\n  {title}\n{rule}\n\n")
}

//! namevault CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use namevault::cli::Commands;
use namevault::commands::{self, CommandContext};
use namevault::{Cli, Result, VaultConfig};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> Result<String> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_tracing(&config, cli.verbose);

    let ctx = CommandContext::new(config, cli.format, cli.verbose);

    match &cli.command {
        Commands::Build(args) => commands::run_build(args, &ctx),
        Commands::Organize(args) => commands::run_organize(args, &ctx),
        Commands::Update(args) => commands::run_update(args, &ctx),
        Commands::Export(args) => commands::run_export(args, &ctx),
        Commands::Related(args) => commands::run_related(args, &ctx),
        Commands::Collections(args) => commands::run_collections(args, &ctx),
        Commands::Variants(args) => commands::run_variants(args, &ctx),
    }
}

/// Logs go to stderr so stdout stays clean for command output.
///
/// RUST_LOG wins; otherwise `--verbose` means debug, else the configured level.
fn init_tracing(config: &VaultConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("namevault={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

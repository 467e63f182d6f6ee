//! tabsmith CLI - tab block content filter.
//!
//! Provides commands for:
//! - `run`: Filter one document from a file or stdin
//! - `build`: Filter a set of files into output files
//! - `filters`: List available filters

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RunArgs};
use output::Output;

/// tabsmith - rewrite tab block markup into Bootstrap tabs.
#[derive(Parser)]
#[command(name = "tabsmith", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a single document.
    Run(RunArgs),
    /// Filter files and write the results.
    Build(BuildArgs),
    /// List available filters.
    Filters,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Run(args) => args.pipeline.verbose,
        Commands::Build(args) => args.pipeline.verbose,
        Commands::Filters => false,
    };

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    // stdout carries filtered documents
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Filters => commands::list_filters(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

/// Log filter: INFO with `--verbose`, otherwise `RUST_LOG` or WARN when it
/// is unset or unparsable.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

const DEFAULT_LOG_LEVEL: &str = "warn";

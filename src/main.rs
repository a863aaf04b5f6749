//! catls - list files and their contents for AI agents
//!
//! catls provides:
//! - Deterministic directory scanning with ignore rules
//! - Binary detection via `file` with a null-byte fallback
//! - Glob-based path and line filtering
//! - XML, JSON and Markdown output

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod flows;

fn init_tracing(debug: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug,globset=warn")
        } else if verbose {
            EnvFilter::new("info,globset=warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.debug, cli.verbose);
    cli::run(cli)
}

//! Carry CLI - peso carry-trade break-evens, corridors and scenario matrices.
//!
//! # Usage
//!
//! ```bash
//! # Break-evens from market-data files, MEP from the feed
//! carry breakeven --quotes notes.json bonds.json --mep-file mep.json
//!
//! # Break-evens with a manual MEP
//! carry breakeven --quotes notes.json --mep 1250 --manual
//!
//! # 6x6 scenario matrix with a compounded bond leg
//! carry matrix --entry-low 1000 --entry-high 1400 --exit-low 944.67 --exit-high 1477.47 \
//!     --bond-entry 135.45 --bond-exit 158.98 --compounded
//!
//! # Corridor bounds
//! carry band --dates 2025-10-26 2026-06-30
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = cli.format;
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Breakeven(args) => commands::breakeven::execute(args, &config, format)?,
        Commands::Matrix(args) => commands::matrix::execute(args, &config, format)?,
        Commands::Band(args) => commands::band::execute(args, &config, format)?,
        Commands::Reference(args) => commands::reference::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only results.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

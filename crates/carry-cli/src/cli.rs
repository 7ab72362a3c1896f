//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BandArgs, BreakevenArgs, ConfigArgs, MatrixArgs, ReferenceArgs};

/// Carry - peso carry-trade analytics CLI
#[derive(Parser)]
#[command(name = "carry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "CARRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Break-even exchange rates for instruments with market quotes
    Breakeven(BreakevenArgs),

    /// Scenario return matrix over entry/exit exchange-rate bands
    Matrix(MatrixArgs),

    /// Crawling-peg corridor bounds
    Band(BandArgs),

    /// Show the instrument reference table
    Reference(ReferenceArgs),

    /// Show or validate configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

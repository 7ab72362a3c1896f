//! Reference table command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use carry_config::CarryConfig;
use carry_core::Date;

use crate::cli::OutputFormat;
use crate::commands::load_reference;
use crate::output::{format_rate, print_header, print_output};

/// Arguments for the reference command.
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Reference table CSV (`symbol,maturity,payoff`) instead of the configured one
    #[arg(long)]
    pub reference_csv: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct ReferenceRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Maturity")]
    maturity: Date,
    #[tabled(rename = "Payoff")]
    payoff: String,
}

/// Executes the reference command.
pub fn execute(args: ReferenceArgs, config: &CarryConfig, format: OutputFormat) -> Result<()> {
    let table = load_reference(args.reference_csv.as_ref(), config)?;

    let rows: Vec<ReferenceRow> = table
        .by_maturity()
        .into_iter()
        .map(|instrument| ReferenceRow {
            ticker: instrument.id.to_string(),
            maturity: instrument.maturity,
            payoff: format_rate(instrument.payoff),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Reference Instruments ({})", rows.len()));
    }
    print_output(&rows, format)
}

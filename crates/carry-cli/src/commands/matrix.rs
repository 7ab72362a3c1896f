//! Scenario matrix command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use carry_analytics::{compute_matrix, ReturnFormula, ScenarioMatrix};
use carry_config::CarryConfig;
use carry_core::Band;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{color_return, format_rate, print_header, print_info, print_single};

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Lowest entry exchange rate
    #[arg(long)]
    pub entry_low: Option<f64>,

    /// Highest entry exchange rate
    #[arg(long)]
    pub entry_high: Option<f64>,

    /// Lowest exit exchange rate
    #[arg(long)]
    pub exit_low: Option<f64>,

    /// Highest exit exchange rate
    #[arg(long)]
    pub exit_high: Option<f64>,

    /// Flat bond return in percent added to every cell
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["bond_entry", "bond_exit"])]
    pub bond_return: Option<f64>,

    /// Bond price at entry
    #[arg(long, requires = "bond_exit")]
    pub bond_entry: Option<f64>,

    /// Bond price (or payoff) at exit
    #[arg(long, requires = "bond_entry")]
    pub bond_exit: Option<f64>,

    /// Compound the bond and currency legs instead of adding them
    #[arg(long, requires = "bond_entry")]
    pub compounded: bool,

    /// Points sampled across each band
    #[arg(short, long)]
    pub samples: Option<usize>,
}

impl MatrixArgs {
    fn entry_band(&self, config: &CarryConfig) -> Result<Band> {
        let default = config.scenario.entry_band;
        Ok(Band::new(
            self.entry_low.unwrap_or(default.low),
            self.entry_high.unwrap_or(default.high),
        )?)
    }

    fn exit_band(&self, config: &CarryConfig) -> Result<Band> {
        let default = config.scenario.exit_band;
        Ok(Band::new(
            self.exit_low.unwrap_or(default.low),
            self.exit_high.unwrap_or(default.high),
        )?)
    }

    fn formula(&self, config: &CarryConfig) -> Result<ReturnFormula> {
        let formula = match (self.bond_return, self.bond_entry, self.bond_exit) {
            (Some(bond_return_pct), _, _) => ReturnFormula::Simple { bond_return_pct },
            (None, Some(entry), Some(exit)) if self.compounded => {
                ReturnFormula::compounded(entry, exit)?
            }
            (None, Some(entry), Some(exit)) => ReturnFormula::simple_from_prices(entry, exit)?,
            (None, None, None) => config.scenario.formula.formula()?,
            _ => {
                return Err(CliError::MissingArgument(
                    "--bond-entry and --bond-exit go together".to_string(),
                )
                .into())
            }
        };
        Ok(formula)
    }
}

#[derive(Serialize)]
struct MatrixOutput<'a> {
    description: String,
    #[serde(flatten)]
    matrix: &'a ScenarioMatrix,
}

/// Executes the matrix command.
pub fn execute(args: MatrixArgs, config: &CarryConfig, format: OutputFormat) -> Result<()> {
    let entry_band = args.entry_band(config)?;
    let exit_band = args.exit_band(config)?;
    let formula = args.formula(config)?;
    let samples = args.samples.unwrap_or(config.scenario.samples);
    if samples < 2 {
        return Err(CliError::InvalidArgument(format!(
            "--samples must be at least 2, got {samples}"
        ))
        .into());
    }

    let matrix = compute_matrix(entry_band, exit_band, formula, samples)?;
    tracing::debug!(
        rows = matrix.dimensions().0,
        undefined = matrix.undefined_count(),
        "scenario matrix computed"
    );

    match format {
        OutputFormat::Json => print_single(&MatrixOutput {
            description: formula.describe(),
            matrix: &matrix,
        })?,
        OutputFormat::Csv => print_csv(&matrix)?,
        OutputFormat::Minimal => {
            for (_, cells) in matrix.rows() {
                let line: Vec<String> = cells.iter().map(ToString::to_string).collect();
                println!("{}", line.join(" "));
            }
        }
        OutputFormat::Table => {
            print_header("Scenario Returns (%)");
            print_info(&format!("Rows: entry rate, columns: exit rate; {}", formula.describe()));
            println!("{}", render_table(&matrix));
            print_summary(&matrix);
        }
    }

    Ok(())
}

fn header_row(matrix: &ScenarioMatrix) -> Vec<String> {
    std::iter::once("Entry \\ Exit".to_string())
        .chain(matrix.exit_samples.iter().map(|x| format_rate(*x)))
        .collect()
}

fn render_table(matrix: &ScenarioMatrix) -> String {
    let mut builder = Builder::default();
    builder.push_record(header_row(matrix));
    for (entry, cells) in matrix.rows() {
        let record = std::iter::once(format_rate(entry)).chain(cells.iter().map(|cell| {
            match cell.value() {
                Some(v) => color_return(v, cell.to_string()),
                None => cell.to_string(),
            }
        }));
        builder.push_record(record);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn print_csv(matrix: &ScenarioMatrix) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(header_row(matrix))?;
    for (entry, cells) in matrix.rows() {
        let record =
            std::iter::once(format_rate(entry)).chain(cells.iter().map(ToString::to_string));
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_summary(matrix: &ScenarioMatrix) {
    let cells: Vec<_> = matrix.cells.iter().flatten().collect();
    let profitable = cells.iter().filter(|c| c.is_profitable()).count();
    let undefined = matrix.undefined_count();
    let losing = cells.len() - profitable - undefined;
    let mut summary = format!(
        "{} profitable, {} flat or losing",
        color_return(1.0, profitable.to_string()),
        color_return(-1.0, losing.to_string()),
    );
    if undefined > 0 {
        summary.push_str(&format!(", {undefined} undefined (n/a)"));
    }
    print_info(&summary);
}

//! Break-even command implementation.
//!
//! Loads quotes, picks the spot rate and prints each instrument's break-even
//! exchange rate next to the corridor bounds at its maturity.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use carry_analytics::{
    classify_result, compute_breakevens_with_report, mep_from_closes, resolve_spot, BreakEvenResult,
    CorridorPosition, Exclusion, SpotSelection,
};
use carry_config::CarryConfig;
use carry_core::{CarryError, CarryResult, Date};
use carry_ext_file::{load_quotes, CsvQuoteSource, JsonMepSource, JsonQuoteSource, QuoteSource};

use crate::cli::OutputFormat;
use crate::commands::{load_reference, parse_date};
use crate::output::{
    format_percent, format_rate, print_header, print_info, print_output, print_single,
    print_table, print_warning,
};

/// Arguments for the breakeven command.
#[derive(Args, Debug)]
pub struct BreakevenArgs {
    /// Market-data files (JSON rows, or CSV `symbol,price` by extension)
    #[arg(short, long, num_args = 1.., required = true)]
    pub quotes: Vec<PathBuf>,

    /// MEP feed used to estimate the spot rate
    #[arg(long)]
    pub mep_file: Option<PathBuf>,

    /// Manual spot rate (overrides the configured one)
    #[arg(long)]
    pub mep: Option<f64>,

    /// Use the manual spot rate even if an MEP feed is given
    #[arg(long)]
    pub manual: bool,

    /// Valuation date for days to maturity (default: today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Reference table CSV (`symbol,maturity,payoff`)
    #[arg(long)]
    pub reference_csv: Option<PathBuf>,

    /// Also list instruments without a usable quote
    #[arg(long)]
    pub show_excluded: bool,
}

/// One printed break-even row.
#[derive(Debug, Serialize, Tabled)]
struct BreakevenRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Payoff")]
    payoff: String,
    #[tabled(rename = "Peso Return")]
    peso_return: String,
    #[tabled(rename = "Break-even")]
    breakeven: String,
    #[tabled(rename = "Band Low")]
    band_low: String,
    #[tabled(rename = "Band High")]
    band_high: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl BreakevenRow {
    fn new(result: &BreakEvenResult, as_of: Date, corridor: Option<&CorridorPosition>) -> Self {
        let dash = || "-".to_string();
        Self {
            ticker: result.id.to_string(),
            maturity: result.maturity.to_string(),
            days: result.days_to_maturity(as_of),
            price: format_rate(result.price),
            payoff: format_rate(result.payoff),
            peso_return: format_percent(result.peso_return_pct()),
            breakeven: format_rate(result.breakeven),
            band_low: corridor.map_or_else(dash, |c| format_rate(c.lower)),
            band_high: corridor.map_or_else(dash, |c| format_rate(c.upper)),
            position: corridor.map_or_else(dash, |c| c.position.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ExcludedRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&Exclusion> for ExcludedRow {
    fn from(exclusion: &Exclusion) -> Self {
        Self {
            ticker: exclusion.id.to_string(),
            reason: exclusion.reason.to_string(),
        }
    }
}

#[derive(Serialize)]
struct BreakevenOutput<'a> {
    as_of: Date,
    spot: &'a SpotSelection,
    results: &'a [BreakEvenResult],
    corridor: &'a [Option<CorridorPosition>],
    excluded: &'a [Exclusion],
}

/// Executes the breakeven command.
pub fn execute(args: BreakevenArgs, config: &CarryConfig, format: OutputFormat) -> Result<()> {
    let as_of = match &args.as_of {
        Some(s) => parse_date(s)?,
        None => Date::today(),
    };

    let spot = select_spot(&args, config)?;
    if let SpotSelection::Fallback { rate, reason } = &spot {
        print_warning(&format!("MEP unavailable ({reason}); using manual rate {rate}"));
    }

    let table = load_reference(args.reference_csv.as_ref(), config)?;
    let sources: Vec<Box<dyn QuoteSource>> =
        args.quotes.iter().map(|p| quote_source(p)).collect();
    let quotes = load_quotes(&sources).context("failed to load quotes")?;
    tracing::debug!(instruments = table.len(), quotes = quotes.len(), "inputs loaded");

    let report = compute_breakevens_with_report(spot.rate(), &table, &quotes)?;

    let corridor = classify_rows(&report.results, config);

    let rows: Vec<BreakevenRow> = report
        .results
        .iter()
        .zip(&corridor)
        .map(|(r, c)| BreakevenRow::new(r, as_of, c.as_ref()))
        .collect();

    match format {
        OutputFormat::Json => print_single(&BreakevenOutput {
            as_of,
            spot: &spot,
            results: &report.results,
            corridor: &corridor,
            excluded: &report.excluded,
        })?,
        OutputFormat::Table => {
            print_header(&format!("Break-even Exchange Rates ({as_of})"));
            print_info(&format!("Spot {} ({})", format_rate(spot.rate()), spot_label(&spot)));
            print_table(&rows)?;
            if args.show_excluded && !report.excluded.is_empty() {
                print_header("Excluded Instruments");
                let excluded: Vec<ExcludedRow> =
                    report.excluded.iter().map(ExcludedRow::from).collect();
                print_table(&excluded)?;
            }
        }
        OutputFormat::Csv | OutputFormat::Minimal => print_output(&rows, format)?,
    }

    Ok(())
}

/// Corridor position per result, `None` where the corridor does not apply.
fn classify_rows(
    results: &[BreakEvenResult],
    config: &CarryConfig,
) -> Vec<Option<CorridorPosition>> {
    let corridor = match config.corridor.corridor() {
        Ok(corridor) => corridor,
        Err(e) => {
            tracing::warn!("corridor not shown: {e}");
            return vec![None; results.len()];
        }
    };
    results
        .iter()
        .map(|result| match classify_result(result, &corridor) {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!("no corridor position for {}: {e}", result.id);
                None
            }
        })
        .collect()
}

fn select_spot(args: &BreakevenArgs, config: &CarryConfig) -> Result<SpotSelection> {
    let manual_rate = args.mep.unwrap_or(config.spot.manual_rate);
    // Without a feed there is no market estimate to fall back from.
    let use_manual = args.manual || config.spot.use_manual || args.mep_file.is_none();
    let market = match (&args.mep_file, use_manual) {
        (Some(path), false) => Some(estimate_mep(&JsonMepSource::new(path))),
        _ => None,
    };
    Ok(resolve_spot(use_manual, manual_rate, market)?)
}

fn estimate_mep(source: &JsonMepSource) -> CarryResult<f64> {
    let closes = source
        .closes()
        .map_err(|e| CarryError::missing_data(e.to_string()))?;
    mep_from_closes(&closes)
}

fn quote_source(path: &Path) -> Box<dyn QuoteSource> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvQuoteSource::new(path))
    } else {
        Box::new(JsonQuoteSource::new([path]))
    }
}

fn spot_label(spot: &SpotSelection) -> &'static str {
    match spot {
        SpotSelection::Manual { .. } => "manual",
        SpotSelection::Market { .. } => "MEP",
        SpotSelection::Fallback { .. } => "manual fallback",
    }
}

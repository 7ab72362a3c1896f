//! Corridor command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use carry_analytics::elapsed_months;
use carry_config::CarryConfig;
use carry_core::Date;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::output::{format_rate, print_header, print_info, print_output, round_dp};

/// Arguments for the band command.
#[derive(Args, Debug)]
pub struct BandArgs {
    /// Dates to evaluate (YYYY-MM-DD); default is the reference date
    #[arg(short, long, num_args = 1..)]
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct BandRow {
    #[tabled(rename = "Date")]
    date: Date,
    #[tabled(rename = "Months")]
    months: String,
    #[tabled(rename = "Lower")]
    lower: String,
    #[tabled(rename = "Upper")]
    upper: String,
}

/// Executes the band command.
pub fn execute(args: BandArgs, config: &CarryConfig, format: OutputFormat) -> Result<()> {
    let corridor = config.corridor.corridor()?;

    let mut dates = args
        .dates
        .iter()
        .map(|s| parse_date(s))
        .collect::<Result<Vec<Date>, _>>()?;
    if dates.is_empty() {
        dates.push(corridor.reference_date);
    }

    let rows = corridor
        .project(&dates)?
        .into_iter()
        .map(|point| -> Result<BandRow> {
            let months = elapsed_months(
                corridor.reference_date,
                point.date,
                corridor.day_count_divisor,
            )?;
            Ok(BandRow {
                date: point.date,
                months: round_dp(months, 2),
                lower: format_rate(point.lower),
                upper: format_rate(point.upper),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if format == OutputFormat::Table {
        print_header("Exchange-Rate Corridor");
        print_info(&format!(
            "From {}: upper {} at {:+.2}%/month, lower {} at {:+.2}%/month",
            corridor.reference_date,
            format_rate(corridor.upper.start_value),
            corridor.upper.monthly_rate * 100.0,
            format_rate(corridor.lower.start_value),
            corridor.lower.monthly_rate * 100.0,
        ));
    }
    print_output(&rows, format)
}

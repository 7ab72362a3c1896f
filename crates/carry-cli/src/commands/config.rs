//! Config command implementation.
//!
//! Shows the effective configuration or checks a configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};

use carry_config::CarryConfig;

use crate::cli::OutputFormat;
use crate::output::{
    format_rate, print_header, print_info, print_output, print_single, print_success, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check the configuration given with --config
    Check,

    /// Print the default configuration as TOML
    Default,
}

/// Executes the config command.
pub fn execute(args: ConfigArgs, config: &CarryConfig, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(config, format),
        ConfigCommand::Check => execute_check(config),
        ConfigCommand::Default => {
            print!("{}", CarryConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn execute_show(config: &CarryConfig, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_single(config);
    }

    let corridor = &config.corridor;
    let scenario = &config.scenario;
    let settings = vec![
        KeyValue::new("spot.manual_rate", format_rate(config.spot.manual_rate)),
        KeyValue::new("spot.use_manual", config.spot.use_manual.to_string()),
        KeyValue::new("corridor.reference_date", corridor.reference_date.to_string()),
        KeyValue::new("corridor.upper_start", format_rate(corridor.upper_start)),
        KeyValue::new(
            "corridor.upper_monthly_rate",
            corridor.upper_monthly_rate.to_string(),
        ),
        KeyValue::new("corridor.lower_start", format_rate(corridor.lower_start)),
        KeyValue::new(
            "corridor.lower_monthly_rate",
            corridor.lower_monthly_rate.to_string(),
        ),
        KeyValue::new(
            "corridor.day_count_divisor",
            corridor.day_count_divisor.to_string(),
        ),
        KeyValue::new(
            "scenario.entry_band",
            format!(
                "{} - {}",
                format_rate(scenario.entry_band.low),
                format_rate(scenario.entry_band.high)
            ),
        ),
        KeyValue::new(
            "scenario.exit_band",
            format!(
                "{} - {}",
                format_rate(scenario.exit_band.low),
                format_rate(scenario.exit_band.high)
            ),
        ),
        KeyValue::new("scenario.samples", scenario.samples.to_string()),
        KeyValue::new("scenario.formula", scenario.formula.formula()?.describe()),
        KeyValue::new(
            "instruments",
            match &config.instruments {
                Some(records) => format!("{} configured", records.len()),
                None => "built-in".to_string(),
            },
        ),
    ];

    if format == OutputFormat::Table {
        print_header("Configuration");
    }
    print_output(&settings, format)
}

fn execute_check(config: &CarryConfig) -> Result<()> {
    // Loading already validated every section.
    let table = config.reference_table()?;
    print_success("Configuration is valid");
    print_info(&format!("{} reference instruments", table.len()));
    Ok(())
}

//! CLI command implementations.

pub mod band;
pub mod breakeven;
pub mod config;
pub mod matrix;
pub mod reference;

pub use band::BandArgs;
pub use breakeven::BreakevenArgs;
pub use config::ConfigArgs;
pub use matrix::MatrixArgs;
pub use reference::ReferenceArgs;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carry_config::CarryConfig;
use carry_core::{Date, ReferenceTable};
use carry_ext_file::CsvReferenceSource;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<CarryConfig> {
    match path {
        Some(path) => CarryConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(CarryConfig::default()),
    }
}

/// The reference table from a CSV override, else from the configuration.
pub fn load_reference(csv: Option<&PathBuf>, config: &CarryConfig) -> Result<ReferenceTable> {
    match csv {
        Some(path) => CsvReferenceSource::new(path)
            .load()
            .with_context(|| format!("failed to load reference table {}", path.display())),
        None => Ok(config.reference_table()?),
    }
}

//! File-based reference data sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use carry_core::{Date, Instrument, ReferenceTable};

use crate::SourceError;

// =============================================================================
// CSV REFERENCE SOURCE
// =============================================================================

/// CSV record for instruments.
#[derive(Debug, Deserialize)]
struct InstrumentRow {
    symbol: String,
    maturity: String,
    payoff: f64,
}

/// CSV-based reference table (`symbol,maturity,payoff`).
#[derive(Debug, Clone)]
pub struct CsvReferenceSource {
    file_path: PathBuf,
}

impl CsvReferenceSource {
    /// Create a new CSV reference source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Reads and validates the table.
    ///
    /// Any unparseable date, non-positive payoff or duplicate symbol fails
    /// the whole load.
    pub fn load(&self) -> Result<ReferenceTable, SourceError> {
        if !self.file_path.exists() {
            return Err(SourceError::NotFound(self.file_path.display().to_string()));
        }

        let parse_error = |reason: String| SourceError::ParseError {
            path: self.file_path.display().to_string(),
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| parse_error(e.to_string()))?;

        let mut table = ReferenceTable::new();
        for (line, result) in reader.deserialize().enumerate() {
            let row: InstrumentRow = result.map_err(|e| parse_error(e.to_string()))?;
            let maturity = Date::parse(&row.maturity)
                .map_err(|e| parse_error(format!("row {}: {e}", line + 1)))?;
            table.insert(Instrument::new(row.symbol, maturity, row.payoff)?)?;
        }

        log::debug!(
            "{} instruments from {}",
            table.len(),
            self.file_path.display()
        );
        Ok(table)
    }
}

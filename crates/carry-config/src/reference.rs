//! Instrument reference data.
//!
//! The built-in table lists the fixed-rate capitalizing notes (LECAP),
//! fixed-rate bonds (BONCAP) and dual-band bonds the dashboard tracks, with
//! the amount each pays at maturity per 100 of original face.

use serde::{Deserialize, Serialize};

use carry_core::{CarryResult, Date, Instrument, ReferenceTable};

use crate::error::{ConfigResult, ValidationError};

/// One row of a reference table in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Ticker.
    pub id: String,
    /// Maturity date (YYYY-MM-DD).
    pub maturity: Date,
    /// Payoff at maturity.
    pub payoff: f64,
}

impl InstrumentRecord {
    /// Converts to a validated instrument.
    pub fn instrument(&self) -> CarryResult<Instrument> {
        Instrument::new(self.id.trim(), self.maturity, self.payoff)
    }
}

const BUILTIN_INSTRUMENTS: &[(&str, (i32, u32, u32), f64)] = &[
    ("S16A5", (2025, 4, 16), 131.211),
    ("S28A5", (2025, 4, 28), 130.813),
    ("S16Y5", (2025, 5, 16), 136.861),
    ("S30Y5", (2025, 5, 30), 136.331),
    ("S18J5", (2025, 6, 18), 147.695),
    ("S30J5", (2025, 6, 30), 146.607),
    ("S31L5", (2025, 7, 31), 147.74),
    ("S15G5", (2025, 8, 15), 146.794),
    ("S29G5", (2025, 8, 29), 157.7),
    ("S12S5", (2025, 9, 12), 158.977),
    ("S30S5", (2025, 9, 30), 159.734),
    ("T17O5", (2025, 10, 15), 158.872),
    ("S31O5", (2025, 10, 31), 132.821),
    ("S10N5", (2025, 11, 10), 122.254),
    ("S28N5", (2025, 11, 28), 123.561),
    ("T15D5", (2025, 12, 15), 170.838),
    ("T30E6", (2026, 1, 30), 142.222),
    ("T13F6", (2026, 2, 13), 144.966),
    ("T30J6", (2026, 6, 30), 144.896),
    ("T15E7", (2027, 1, 15), 160.777),
    ("TTM26", (2026, 3, 16), 135.238),
    ("TTJ26", (2026, 6, 30), 144.629),
    ("TTS26", (2026, 9, 15), 152.096),
    ("TTD26", (2026, 12, 15), 161.144),
];

/// Records for the built-in instruments.
pub fn builtin_records() -> Vec<InstrumentRecord> {
    BUILTIN_INSTRUMENTS
        .iter()
        .filter_map(|&(id, (y, m, d), payoff)| {
            Date::from_ymd(y, m, d).ok().map(|maturity| InstrumentRecord {
                id: id.to_string(),
                maturity,
                payoff,
            })
        })
        .collect()
}

/// The built-in reference table.
pub fn builtin_reference_table() -> ConfigResult<ReferenceTable> {
    build_table(&builtin_records())
}

/// Builds a validated table from configuration records.
pub fn build_table(records: &[InstrumentRecord]) -> ConfigResult<ReferenceTable> {
    let instruments = records
        .iter()
        .map(InstrumentRecord::instrument)
        .collect::<CarryResult<Vec<_>>>()?;
    let table = ReferenceTable::from_instruments(instruments)?;
    log::debug!("reference table loaded with {} instruments", table.len());
    Ok(table)
}

/// Validation problems in a list of records, one per bad row.
pub(crate) fn validate_records(records: &[InstrumentRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (i, record) in records.iter().enumerate() {
        let field = format!("instruments[{i}]");
        if record.id.trim().is_empty() {
            errors.push(ValidationError::new(&field, "Identifier cannot be empty"));
        } else if !seen.insert(record.id.trim().to_string()) {
            errors.push(ValidationError::new(
                &field,
                format!("Duplicate identifier {}", record.id),
            ));
        }
        if !record.payoff.is_finite() || record.payoff <= 0.0 {
            errors.push(ValidationError::new(
                &field,
                format!("Payoff must be positive, got {}", record.payoff),
            ));
        }
    }

    errors
}

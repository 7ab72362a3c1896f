//! Instrument reference data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{CarryError, CarryResult};

/// Instrument identifier (exchange ticker, e.g. `S30J5`).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create a new instrument ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Static reference record for a peso instrument.
///
/// `payoff` is the amount paid at maturity per unit of the quoted price
/// (the same units the market quotes the instrument in).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Date the payoff is paid.
    pub maturity: Date,
    /// Payoff at maturity.
    pub payoff: f64,
}

impl Instrument {
    /// Creates a new instrument.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` if the payoff is not a finite,
    /// strictly positive number.
    pub fn new(id: impl Into<InstrumentId>, maturity: Date, payoff: f64) -> CarryResult<Self> {
        let id = id.into();
        if !payoff.is_finite() || payoff <= 0.0 {
            return Err(CarryError::invalid_input(format!(
                "payoff for {id} must be a positive number, got {payoff}"
            )));
        }
        Ok(Self {
            id,
            maturity,
            payoff,
        })
    }
}

/// Typed identifier → instrument mapping.
///
/// Every record is validated on insertion, so a table that exists is a table
/// whose payoffs are usable and whose identifiers are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    instruments: BTreeMap<InstrumentId, Instrument>,
}

impl ReferenceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list of instruments.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate identifier or invalid payoff.
    pub fn from_instruments(
        instruments: impl IntoIterator<Item = Instrument>,
    ) -> CarryResult<Self> {
        let mut table = Self::new();
        for instrument in instruments {
            table.insert(instrument)?;
        }
        Ok(table)
    }

    /// Adds an instrument.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` if the identifier is already present
    /// or the payoff is invalid.
    pub fn insert(&mut self, instrument: Instrument) -> CarryResult<()> {
        if !instrument.payoff.is_finite() || instrument.payoff <= 0.0 {
            return Err(CarryError::invalid_input(format!(
                "payoff for {} must be a positive number, got {}",
                instrument.id, instrument.payoff
            )));
        }
        if self.instruments.contains_key(&instrument.id) {
            return Err(CarryError::invalid_input(format!(
                "duplicate instrument: {}",
                instrument.id
            )));
        }
        self.instruments.insert(instrument.id.clone(), instrument);
        Ok(())
    }

    /// Looks up an instrument.
    pub fn get(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.get(id)
    }

    /// Looks up an instrument that must exist.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::MissingData` if the identifier is unknown.
    pub fn require(&self, id: &InstrumentId) -> CarryResult<&Instrument> {
        self.get(id)
            .ok_or_else(|| CarryError::missing_data(format!("unknown instrument: {id}")))
    }

    /// Returns true if the identifier is in the table.
    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.instruments.contains_key(id)
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the table has no instruments.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Iterates over instruments in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    /// Instruments sorted by maturity, ties broken by identifier.
    pub fn by_maturity(&self) -> Vec<&Instrument> {
        let mut sorted: Vec<&Instrument> = self.iter().collect();
        sorted.sort_by(|a, b| a.maturity.cmp(&b.maturity).then_with(|| a.id.cmp(&b.id)));
        sorted
    }
}

//! Scenario return matrices.
//!
//! A carry trade sells dollars at an entry exchange rate `e`, holds a peso
//! position, and buys dollars back at an exit rate `x`. The matrix evaluates
//! the dollar return over a grid of `(e, x)` pairs sampled evenly across an
//! entry band and an exit band.
//!
//! Two return formulas are supported and they are not equivalent:
//!
//! - [`ReturnFormula::Simple`] adds a flat bond return to the currency
//!   return: `((e / x) − 1) × 100 + bond_return_pct`
//! - [`ReturnFormula::Compounded`] multiplies the bond and currency legs:
//!   `((e × exit_price) / (entry_price × x) − 1) × 100`
//!
//! The compounded form is larger whenever both legs are positive, and the gap
//! grows with the size of the returns.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use carry_core::{Band, CarryError, CarryResult};

/// Points sampled across each band by default.
pub const DEFAULT_SAMPLES: usize = 6;

/// Holding-period return of a bond bought at `entry_price` and sold (or
/// redeemed) at `exit_price`, in percent.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` unless both prices are finite and
/// strictly positive.
pub fn holding_return_pct(entry_price: f64, exit_price: f64) -> CarryResult<f64> {
    validate_bond_prices(entry_price, exit_price)?;
    Ok((exit_price / entry_price - 1.0) * 100.0)
}

fn validate_bond_prices(entry_price: f64, exit_price: f64) -> CarryResult<()> {
    if !entry_price.is_finite() || entry_price <= 0.0 {
        return Err(CarryError::invalid_input(format!(
            "bond entry price must be positive, got {entry_price}"
        )));
    }
    if !exit_price.is_finite() || exit_price <= 0.0 {
        return Err(CarryError::invalid_input(format!(
            "bond exit price must be positive, got {exit_price}"
        )));
    }
    Ok(())
}

/// How a matrix cell combines the currency and bond legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum ReturnFormula {
    /// Currency return plus a flat bond return, in percent.
    Simple {
        /// Bond return added to every cell. Zero gives the currency-only matrix.
        bond_return_pct: f64,
    },
    /// Currency and bond legs compounded together.
    Compounded {
        /// Bond price at entry.
        bond_entry_price: f64,
        /// Bond price (or payoff) at exit.
        bond_exit_price: f64,
    },
}

impl Default for ReturnFormula {
    fn default() -> Self {
        Self::fx_only()
    }
}

impl ReturnFormula {
    /// Currency-only returns.
    pub fn fx_only() -> Self {
        Self::Simple {
            bond_return_pct: 0.0,
        }
    }

    /// Simple formula with the bond return implied by a price pair.
    ///
    /// # Errors
    ///
    /// See [`holding_return_pct`].
    pub fn simple_from_prices(entry_price: f64, exit_price: f64) -> CarryResult<Self> {
        Ok(Self::Simple {
            bond_return_pct: holding_return_pct(entry_price, exit_price)?,
        })
    }

    /// Compounded formula from a price pair.
    ///
    /// # Errors
    ///
    /// See [`holding_return_pct`].
    pub fn compounded(entry_price: f64, exit_price: f64) -> CarryResult<Self> {
        validate_bond_prices(entry_price, exit_price)?;
        Ok(Self::Compounded {
            bond_entry_price: entry_price,
            bond_exit_price: exit_price,
        })
    }

    /// Checks the formula parameters.
    pub fn validate(&self) -> CarryResult<()> {
        match *self {
            Self::Simple { bond_return_pct } if !bond_return_pct.is_finite() => Err(
                CarryError::invalid_input(format!(
                    "bond return must be finite, got {bond_return_pct}"
                )),
            ),
            Self::Simple { .. } => Ok(()),
            Self::Compounded {
                bond_entry_price,
                bond_exit_price,
            } => validate_bond_prices(bond_entry_price, bond_exit_price),
        }
    }

    /// Human-readable description of the formula in use.
    pub fn describe(&self) -> String {
        match *self {
            Self::Simple { bond_return_pct } if bond_return_pct == 0.0 => {
                "simple: (entry / exit - 1) x 100".to_string()
            }
            Self::Simple { bond_return_pct } => {
                format!("simple: (entry / exit - 1) x 100 + {bond_return_pct:.2}")
            }
            Self::Compounded {
                bond_entry_price,
                bond_exit_price,
            } => format!(
                "compounded: ((entry x {bond_exit_price}) / ({bond_entry_price} x exit) - 1) x 100"
            ),
        }
    }

    /// Cell value for one entry/exit pair.
    ///
    /// Returns [`ScenarioCell::Undefined`] when the exit rate is zero or the
    /// result is not finite.
    pub fn evaluate(&self, entry: f64, exit: f64) -> ScenarioCell {
        if exit == 0.0 {
            return ScenarioCell::Undefined;
        }
        let value = match *self {
            Self::Simple { bond_return_pct } => (entry / exit - 1.0) * 100.0 + bond_return_pct,
            Self::Compounded {
                bond_entry_price,
                bond_exit_price,
            } => ((entry * bond_exit_price) / (bond_entry_price * exit) - 1.0) * 100.0,
        };
        if value.is_finite() {
            ScenarioCell::Value(value)
        } else {
            ScenarioCell::Undefined
        }
    }
}

/// One matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScenarioCell {
    /// Return in percent, full precision.
    Value(f64),
    /// No defined return (zero exit rate).
    Undefined,
}

impl ScenarioCell {
    /// Full-precision value, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    /// Value rounded to two decimal places, for display.
    pub fn display_value(&self) -> Option<Decimal> {
        self.value()
            .and_then(Decimal::from_f64)
            .map(|d| d.round_dp(2))
    }

    /// Returns true for a strictly positive return.
    pub fn is_profitable(&self) -> bool {
        self.value().is_some_and(|v| v > 0.0)
    }

    /// Returns true if the cell has no value.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl std::fmt::Display for ScenarioCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.display_value() {
            Some(d) => write!(f, "{d:.2}"),
            None => f.write_str("n/a"),
        }
    }
}

/// Grid of returns; rows are entry samples, columns exit samples, both
/// ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioMatrix {
    /// Entry exchange-rate samples (row headers).
    pub entry_samples: Vec<f64>,
    /// Exit exchange-rate samples (column headers).
    pub exit_samples: Vec<f64>,
    /// `cells[row][col]` is the return for `entry_samples[row]` and
    /// `exit_samples[col]`.
    pub cells: Vec<Vec<ScenarioCell>>,
    /// Formula used for every cell.
    pub formula: ReturnFormula,
}

impl ScenarioMatrix {
    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.entry_samples.len(), self.exit_samples.len())
    }

    /// Cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<ScenarioCell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterates over `(entry_sample, row_cells)`.
    pub fn rows(&self) -> impl Iterator<Item = (f64, &[ScenarioCell])> {
        self.entry_samples
            .iter()
            .copied()
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Number of undefined cells.
    pub fn undefined_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_undefined())
            .count()
    }
}

/// `samples` evenly spaced points from `band.low` to `band.high` inclusive.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` for an invalid band or fewer than two
/// samples.
pub fn band_samples(band: Band, samples: usize) -> CarryResult<Vec<f64>> {
    band.validate()?;
    if samples < 2 {
        return Err(CarryError::invalid_input(format!(
            "at least 2 samples required, got {samples}"
        )));
    }
    let last = (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| {
            if i == samples - 1 {
                band.high
            } else {
                band.low + band.width() * (i as f64 / last)
            }
        })
        .collect())
}

/// Builds a `samples × samples` return matrix.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if either band is inverted or not
/// finite, `samples < 2`, or the formula parameters are invalid. Zero exit
/// samples do not fail; those cells are [`ScenarioCell::Undefined`].
pub fn compute_matrix(
    entry_band: Band,
    exit_band: Band,
    formula: ReturnFormula,
    samples: usize,
) -> CarryResult<ScenarioMatrix> {
    formula.validate()?;
    let entry_samples = band_samples(entry_band, samples)?;
    let exit_samples = band_samples(exit_band, samples)?;

    let cells: Vec<Vec<ScenarioCell>> = entry_samples
        .iter()
        .map(|&entry| {
            exit_samples
                .iter()
                .map(|&exit| formula.evaluate(entry, exit))
                .collect()
        })
        .collect();

    let matrix = ScenarioMatrix {
        entry_samples,
        exit_samples,
        cells,
        formula,
    };

    let undefined = matrix.undefined_count();
    if undefined > 0 {
        log::debug!("scenario matrix has {undefined} undefined cells");
    }

    Ok(matrix)
}

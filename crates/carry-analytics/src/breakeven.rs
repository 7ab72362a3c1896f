//! Break-even exchange rates.
//!
//! Buying a peso instrument at `price` with pesos obtained at `spot_rate`
//! and collecting `payoff` at maturity returns the original dollars exactly
//! when the exit exchange rate is
//!
//! ```text
//! BE = spot_rate × payoff / price
//! ```
//!
//! An exit rate below `BE` is a dollar gain; above it, a loss.

use serde::Serialize;

use carry_core::{CarryError, CarryResult, Date, InstrumentId, QuoteBook, ReferenceTable};

/// Break-even for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakEvenResult {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Maturity date.
    pub maturity: Date,
    /// Payoff at maturity.
    pub payoff: f64,
    /// Market price used.
    pub price: f64,
    /// Break-even exchange rate.
    pub breakeven: f64,
}

impl BreakEvenResult {
    /// Calendar days from `as_of` to maturity. Negative once matured.
    pub fn days_to_maturity(&self, as_of: Date) -> i64 {
        as_of.days_between(&self.maturity)
    }

    /// Peso return to maturity implied by payoff over price, in percent.
    pub fn peso_return_pct(&self) -> f64 {
        (self.payoff / self.price - 1.0) * 100.0
    }
}

/// Why an instrument is absent from the results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", content = "price", rename_all = "snake_case")]
pub enum MissingDataReason {
    /// No quote for the identifier, or a quote row without a price.
    NoQuote,
    /// The quoted price is zero, negative or not a number.
    NonPositivePrice(f64),
}

impl std::fmt::Display for MissingDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoQuote => f.write_str("no quote"),
            Self::NonPositivePrice(p) => write!(f, "non-positive price {p}"),
        }
    }
}

/// An instrument left out of the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Reason for exclusion.
    #[serde(flatten)]
    pub reason: MissingDataReason,
}

/// Results plus the instruments that were filtered out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreakEvenReport {
    /// Spot rate used.
    pub spot_rate: f64,
    /// Break-evens ordered by maturity, then identifier.
    pub results: Vec<BreakEvenResult>,
    /// Reference instruments without a usable quote, ordered by identifier.
    pub excluded: Vec<Exclusion>,
}

impl BreakEvenReport {
    /// Returns true if no instrument had a usable quote.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Computes break-even rates for every instrument with a usable quote.
///
/// Instruments without a quote, or whose quote is not strictly positive,
/// are dropped; the output set is generally smaller than the reference table.
/// Quotes for identifiers outside the table are ignored.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if `spot_rate` is not a finite,
/// strictly positive number. An empty result is not an error.
pub fn compute_breakevens(
    spot_rate: f64,
    instruments: &ReferenceTable,
    quotes: &QuoteBook,
) -> CarryResult<Vec<BreakEvenResult>> {
    compute_breakevens_with_report(spot_rate, instruments, quotes).map(|report| report.results)
}

/// Like [`compute_breakevens`], also reporting which instruments were dropped.
///
/// # Errors
///
/// Same as [`compute_breakevens`].
pub fn compute_breakevens_with_report(
    spot_rate: f64,
    instruments: &ReferenceTable,
    quotes: &QuoteBook,
) -> CarryResult<BreakEvenReport> {
    if !spot_rate.is_finite() || spot_rate <= 0.0 {
        return Err(CarryError::invalid_input(format!(
            "spot rate must be positive, got {spot_rate}"
        )));
    }

    let mut results = Vec::new();
    let mut excluded = Vec::new();

    // ReferenceTable iterates in identifier order, so `excluded` is sorted.
    for instrument in instruments.iter() {
        let quote = quotes.get(&instrument.id);
        match (quote.and_then(|q| q.usable_price()), quote.and_then(|q| q.price)) {
            (Some(price), _) => results.push(BreakEvenResult {
                id: instrument.id.clone(),
                maturity: instrument.maturity,
                payoff: instrument.payoff,
                price,
                breakeven: spot_rate * (instrument.payoff / price),
            }),
            (None, Some(price)) => {
                log::debug!("excluding {}: non-positive price {}", instrument.id, price);
                excluded.push(Exclusion {
                    id: instrument.id.clone(),
                    reason: MissingDataReason::NonPositivePrice(price),
                });
            }
            (None, None) => {
                log::debug!("excluding {}: no quote", instrument.id);
                excluded.push(Exclusion {
                    id: instrument.id.clone(),
                    reason: MissingDataReason::NoQuote,
                });
            }
        }
    }

    results.sort_by(|a, b| a.maturity.cmp(&b.maturity).then_with(|| a.id.cmp(&b.id)));

    if results.is_empty() {
        log::warn!(
            "no break-evens computed: {} instruments, {} quotes",
            instruments.len(),
            quotes.len()
        );
    }

    Ok(BreakEvenReport {
        spot_rate,
        results,
        excluded,
    })
}

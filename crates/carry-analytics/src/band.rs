//! Crawling-peg corridor projection.
//!
//! The corridor is modelled as two legs growing (or shrinking) at a fixed
//! monthly rate from a reference date:
//!
//! ```text
//! value(date) = start × (1 + monthly_rate) ^ (days(date − reference) / divisor)
//! ```
//!
//! The upper leg uses a positive rate (+1%/month by default) and the lower leg
//! a negative one (−1%/month). The day-count divisor converts calendar days to
//! months; 30.44 is the average month length, 30 the coarser convention.

use serde::Serialize;

use carry_core::{Band, CarryError, CarryResult, Date, InstrumentId};

use crate::breakeven::BreakEvenResult;

/// Average days per month used to convert elapsed days into months.
pub const DEFAULT_DAY_COUNT_DIVISOR: f64 = 30.44;

/// Months elapsed from `reference_date` to `date`.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if `date` precedes `reference_date` or
/// the divisor is not strictly positive.
pub fn elapsed_months(
    reference_date: Date,
    date: Date,
    day_count_divisor: f64,
) -> CarryResult<f64> {
    if !day_count_divisor.is_finite() || day_count_divisor <= 0.0 {
        return Err(CarryError::invalid_input(format!(
            "day count divisor must be positive, got {day_count_divisor}"
        )));
    }
    let days = reference_date.days_between(&date);
    if days < 0 {
        return Err(CarryError::invalid_input(format!(
            "date {date} precedes corridor reference date {reference_date}"
        )));
    }
    Ok(days as f64 / day_count_divisor)
}

/// Projects one corridor leg onto `dates` using the default 30.44-day month.
///
/// # Errors
///
/// See [`project_band_with_divisor`].
pub fn project_band(
    reference_date: Date,
    curve_start_value: f64,
    monthly_rate: f64,
    dates: &[Date],
) -> CarryResult<Vec<f64>> {
    project_band_with_divisor(
        reference_date,
        curve_start_value,
        monthly_rate,
        dates,
        DEFAULT_DAY_COUNT_DIVISOR,
    )
}

/// Projects one corridor leg onto `dates`.
///
/// Output order matches `dates`.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if the start value is not positive,
/// the monthly rate is not greater than −100%, any date precedes
/// `reference_date`, or the divisor is not positive.
pub fn project_band_with_divisor(
    reference_date: Date,
    curve_start_value: f64,
    monthly_rate: f64,
    dates: &[Date],
    day_count_divisor: f64,
) -> CarryResult<Vec<f64>> {
    let leg = BandLeg::new(curve_start_value, monthly_rate)?;
    dates
        .iter()
        .map(|&date| {
            let months = elapsed_months(reference_date, date, day_count_divisor)?;
            Ok(leg.value_after(months))
        })
        .collect()
}

/// One edge of the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandLeg {
    /// Value at the reference date.
    pub start_value: f64,
    /// Compound growth per month (0.01 = +1%).
    pub monthly_rate: f64,
}

impl BandLeg {
    /// Creates a validated leg.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` for a non-positive start value or a
    /// monthly rate at or below −100%.
    pub fn new(start_value: f64, monthly_rate: f64) -> CarryResult<Self> {
        if !start_value.is_finite() || start_value <= 0.0 {
            return Err(CarryError::invalid_input(format!(
                "band start value must be positive, got {start_value}"
            )));
        }
        if !monthly_rate.is_finite() || monthly_rate <= -1.0 {
            return Err(CarryError::invalid_input(format!(
                "monthly rate must be greater than -100%, got {monthly_rate}"
            )));
        }
        Ok(Self {
            start_value,
            monthly_rate,
        })
    }

    /// Value after `months` months.
    pub fn value_after(&self, months: f64) -> f64 {
        self.start_value * (1.0 + self.monthly_rate).powf(months)
    }
}

/// Corridor bounds at one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorridorPoint {
    /// Evaluation date.
    pub date: Date,
    /// Lower corridor bound.
    pub lower: f64,
    /// Upper corridor bound.
    pub upper: f64,
}

/// A two-legged crawling-peg corridor anchored at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandCorridor {
    /// Date at which both legs take their start values.
    pub reference_date: Date,
    /// Upper leg.
    pub upper: BandLeg,
    /// Lower leg.
    pub lower: BandLeg,
    /// Days per month.
    pub day_count_divisor: f64,
}

impl BandCorridor {
    /// Creates a corridor with the default day-count divisor.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` if the lower leg starts above the
    /// upper leg.
    pub fn new(reference_date: Date, lower: BandLeg, upper: BandLeg) -> CarryResult<Self> {
        if lower.start_value > upper.start_value {
            return Err(CarryError::invalid_input(format!(
                "lower leg starts at {} above upper leg {}",
                lower.start_value, upper.start_value
            )));
        }
        Ok(Self {
            reference_date,
            upper,
            lower,
            day_count_divisor: DEFAULT_DAY_COUNT_DIVISOR,
        })
    }

    /// Overrides the day-count divisor.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` for a non-positive divisor.
    pub fn with_day_count_divisor(mut self, divisor: f64) -> CarryResult<Self> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(CarryError::invalid_input(format!(
                "day count divisor must be positive, got {divisor}"
            )));
        }
        self.day_count_divisor = divisor;
        Ok(self)
    }

    /// Corridor bounds at `date`.
    pub fn bounds_at(&self, date: Date) -> CarryResult<Band> {
        let months = elapsed_months(self.reference_date, date, self.day_count_divisor)?;
        let lower = self.lower.value_after(months);
        let upper = self.upper.value_after(months);
        // Legs cross only if the lower leg grows faster than the upper one.
        Ok(Band {
            low: lower.min(upper),
            high: lower.max(upper),
        })
    }

    /// Corridor bounds for each date, in input order.
    pub fn project(&self, dates: &[Date]) -> CarryResult<Vec<CorridorPoint>> {
        dates
            .iter()
            .map(|&date| {
                let band = self.bounds_at(date)?;
                Ok(CorridorPoint {
                    date,
                    lower: band.low,
                    upper: band.high,
                })
            })
            .collect()
    }

    /// The reference date followed by every result maturity.
    ///
    /// This is the x-axis of a break-even versus corridor chart.
    pub fn chart_dates(&self, results: &[BreakEvenResult]) -> Vec<Date> {
        std::iter::once(self.reference_date)
            .chain(results.iter().map(|r| r.maturity))
            .collect()
    }
}

/// Where a break-even sits relative to the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    /// Below the lower bound: the peg would have to break downward to lose.
    Below,
    /// Within the corridor, bounds included.
    Inside,
    /// Above the upper bound: the trade wins anywhere inside the corridor.
    Above,
}

impl std::fmt::Display for BandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Below => "below",
            Self::Inside => "inside",
            Self::Above => "above",
        };
        f.write_str(label)
    }
}

/// A break-even located against the corridor at its maturity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorPosition {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Maturity date.
    pub maturity: Date,
    /// Break-even exchange rate.
    pub breakeven: f64,
    /// Lower corridor bound at maturity.
    pub lower: f64,
    /// Upper corridor bound at maturity.
    pub upper: f64,
    /// Classification.
    pub position: BandPosition,
}

/// Locates one break-even against the corridor at its maturity.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if the maturity precedes the
/// corridor's reference date.
pub fn classify_result(
    result: &BreakEvenResult,
    corridor: &BandCorridor,
) -> CarryResult<CorridorPosition> {
    let band = corridor.bounds_at(result.maturity)?;
    let position = if result.breakeven < band.low {
        BandPosition::Below
    } else if result.breakeven > band.high {
        BandPosition::Above
    } else {
        BandPosition::Inside
    };
    Ok(CorridorPosition {
        id: result.id.clone(),
        maturity: result.maturity,
        breakeven: result.breakeven,
        lower: band.low,
        upper: band.high,
        position,
    })
}

/// Classifies every result against the corridor, preserving result order.
///
/// Use [`classify_result`] to keep the rows that can be classified when
/// some cannot.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if any maturity precedes the
/// corridor's reference date.
pub fn classify(
    results: &[BreakEvenResult],
    corridor: &BandCorridor,
) -> CarryResult<Vec<CorridorPosition>> {
    results
        .iter()
        .map(|result| classify_result(result, corridor))
        .collect()
}

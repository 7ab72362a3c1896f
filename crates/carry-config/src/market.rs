//! Spot-rate and corridor configuration.

use serde::{Deserialize, Serialize};

use carry_analytics::{BandCorridor, BandLeg, DEFAULT_DAY_COUNT_DIVISOR};
use carry_core::{CarryResult, Date};

use crate::error::{Validate, ValidationError};

// =============================================================================
// SPOT CONFIGURATION
// =============================================================================

/// How the spot exchange rate is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    /// Manual MEP rate (ARS per USD). Used when `use_manual` is set or the
    /// market estimate is unavailable.
    pub manual_rate: f64,

    /// Ignore market data and use `manual_rate`.
    pub use_manual: bool,
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            manual_rate: 1250.0,
            use_manual: false,
        }
    }
}

impl Validate for SpotConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.manual_rate.is_finite() || self.manual_rate <= 0.0 {
            errors.push(ValidationError::new(
                "manual_rate",
                format!("Manual rate must be positive, got {}", self.manual_rate),
            ));
        }
        errors
    }
}

// =============================================================================
// CORRIDOR CONFIGURATION
// =============================================================================

/// Crawling-peg corridor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Date at which both legs take their start values.
    pub reference_date: Date,

    /// Upper leg value at the reference date.
    pub upper_start: f64,

    /// Upper leg compound growth per month.
    pub upper_monthly_rate: f64,

    /// Lower leg value at the reference date.
    pub lower_start: f64,

    /// Lower leg compound growth per month.
    pub lower_monthly_rate: f64,

    /// Days per month.
    pub day_count_divisor: f64,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            reference_date: DEFAULT_REFERENCE_DATE,
            upper_start: 1400.0,
            upper_monthly_rate: 0.01,
            lower_start: 1000.0,
            lower_monthly_rate: -0.01,
            day_count_divisor: DEFAULT_DAY_COUNT_DIVISOR,
        }
    }
}

/// Anchor of the published crawling-peg corridor.
const DEFAULT_REFERENCE_DATE: Date = match Date::from_ymd_opt(2025, 4, 14) {
    Some(date) => date,
    None => panic!("invalid default corridor reference date"),
};

impl CorridorConfig {
    /// Builds the corridor.
    pub fn corridor(&self) -> CarryResult<BandCorridor> {
        BandCorridor::new(
            self.reference_date,
            BandLeg::new(self.lower_start, self.lower_monthly_rate)?,
            BandLeg::new(self.upper_start, self.upper_monthly_rate)?,
        )?
        .with_day_count_divisor(self.day_count_divisor)
    }
}

impl Validate for CorridorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("upper_start", self.upper_start),
            ("lower_start", self.lower_start),
            ("day_count_divisor", self.day_count_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ValidationError::new(
                    field,
                    format!("Must be positive, got {value}"),
                ));
            }
        }

        for (field, rate) in [
            ("upper_monthly_rate", self.upper_monthly_rate),
            ("lower_monthly_rate", self.lower_monthly_rate),
        ] {
            if !rate.is_finite() || rate <= -1.0 {
                errors.push(ValidationError::new(
                    field,
                    format!("Monthly rate must be greater than -1, got {rate}"),
                ));
            }
        }

        if self.lower_start > self.upper_start {
            errors.push(ValidationError::new(
                "lower_start",
                format!(
                    "Lower start {} exceeds upper start {}",
                    self.lower_start, self.upper_start
                ),
            ));
        }

        errors
    }
}

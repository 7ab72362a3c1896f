//! Price band.

use serde::{Deserialize, Serialize};

use crate::error::{CarryError, CarryResult};

/// A (lower, upper) pair on a price axis.
///
/// Used both as a point on the crawling-peg corridor and as the sampling range
/// for scenario matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl Band {
    /// Creates a validated band.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidInput` if either bound is not finite or
    /// `low > high`.
    pub fn new(low: f64, high: f64) -> CarryResult<Self> {
        let band = Self { low, high };
        band.validate()?;
        Ok(band)
    }

    /// Checks the band invariants.
    ///
    /// Bands may be built with a struct literal or deserialized, so consumers
    /// call this before use.
    pub fn validate(&self) -> CarryResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(CarryError::invalid_input(format!(
                "band bounds must be finite, got ({}, {})",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(CarryError::invalid_input(format!(
                "band lower bound {} exceeds upper bound {}",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Width of the band.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if `value` lies within the band, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

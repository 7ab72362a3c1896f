//! Spot exchange rate (MEP) selection.

use serde::Serialize;

use carry_core::{CarryError, CarryResult};

/// Median of the usable closes in an MEP feed.
///
/// Non-finite and non-positive closes are ignored. With an even count the
/// median is the mean of the two middle values.
///
/// # Errors
///
/// Returns `CarryError::MissingData` if no usable close remains.
pub fn mep_from_closes(closes: &[f64]) -> CarryResult<f64> {
    let mut usable: Vec<f64> = closes
        .iter()
        .copied()
        .filter(|c| c.is_finite() && *c > 0.0)
        .collect();

    if usable.is_empty() {
        return Err(CarryError::missing_data(format!(
            "no usable MEP close among {} rows",
            closes.len()
        )));
    }

    usable.sort_by(f64::total_cmp);
    let mid = usable.len() / 2;
    let median = if usable.len() % 2 == 0 {
        (usable[mid - 1] + usable[mid]) / 2.0
    } else {
        usable[mid]
    };
    Ok(median)
}

/// The spot rate chosen for a run and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SpotSelection {
    /// The user asked for the manual value.
    Manual {
        /// Rate.
        rate: f64,
    },
    /// Estimated from market data.
    Market {
        /// Rate.
        rate: f64,
    },
    /// Market data was requested but unavailable; the manual value was used.
    Fallback {
        /// Rate.
        rate: f64,
        /// Why the market estimate could not be used.
        reason: String,
    },
}

impl SpotSelection {
    /// The selected rate.
    pub fn rate(&self) -> f64 {
        match self {
            Self::Manual { rate } | Self::Market { rate } | Self::Fallback { rate, .. } => *rate,
        }
    }

    /// Returns true if the manual value replaced a failed market estimate.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Chooses the spot rate.
///
/// With `use_manual` the manual rate is used outright. Otherwise a successful
/// market estimate wins, and a missing or failed one falls back to the manual
/// rate.
///
/// # Errors
///
/// Returns `CarryError::InvalidInput` if the manual rate is needed and is not
/// strictly positive.
pub fn resolve_spot(
    use_manual: bool,
    manual_rate: f64,
    market: Option<CarryResult<f64>>,
) -> CarryResult<SpotSelection> {
    let manual = || {
        if manual_rate.is_finite() && manual_rate > 0.0 {
            Ok(manual_rate)
        } else {
            Err(CarryError::invalid_input(format!(
                "manual exchange rate must be positive, got {manual_rate}"
            )))
        }
    };

    if use_manual {
        return Ok(SpotSelection::Manual { rate: manual()? });
    }

    match market {
        Some(Ok(rate)) if rate.is_finite() && rate > 0.0 => Ok(SpotSelection::Market { rate }),
        Some(Ok(rate)) => {
            let reason = format!("market estimate {rate} is not positive");
            log::warn!("{reason}; using manual rate {manual_rate}");
            Ok(SpotSelection::Fallback {
                rate: manual()?,
                reason,
            })
        }
        Some(Err(e)) => {
            log::warn!("market spot unavailable ({e}); using manual rate {manual_rate}");
            Ok(SpotSelection::Fallback {
                rate: manual()?,
                reason: e.to_string(),
            })
        }
        None => {
            log::warn!("no market spot source; using manual rate {manual_rate}");
            Ok(SpotSelection::Fallback {
                rate: manual()?,
                reason: "no market data source".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd_and_even() {
        assert_relative_eq!(mep_from_closes(&[1190.0, 1210.0, 1200.0]).unwrap(), 1200.0);
        assert_relative_eq!(
            mep_from_closes(&[1190.0, 1210.0, 1200.0, 1220.0]).unwrap(),
            1205.0
        );
    }

    #[test]
    fn test_median_ignores_unusable_closes() {
        let closes = [0.0, f64::NAN, 1200.0, -10.0, 1210.0];
        assert_relative_eq!(mep_from_closes(&closes).unwrap(), 1205.0);
    }

    #[test]
    fn test_median_of_nothing_is_missing_data() {
        assert!(mep_from_closes(&[]).unwrap_err().is_missing_data());
        assert!(mep_from_closes(&[0.0, f64::NAN]).unwrap_err().is_missing_data());
    }

    #[test]
    fn test_manual_overrides_market() {
        let spot = resolve_spot(true, 1250.0, Some(Ok(1200.0))).unwrap();
        assert_eq!(spot, SpotSelection::Manual { rate: 1250.0 });
    }

    #[test]
    fn test_market_used_when_available() {
        let spot = resolve_spot(false, 1250.0, Some(Ok(1200.0))).unwrap();
        assert_eq!(spot, SpotSelection::Market { rate: 1200.0 });
        assert!(!spot.is_fallback());
    }

    #[test]
    fn test_failed_market_falls_back() {
        let spot =
            resolve_spot(false, 1250.0, Some(Err(CarryError::missing_data("feed empty")))).unwrap();
        assert!(spot.is_fallback());
        assert_eq!(spot.rate(), 1250.0);

        let spot = resolve_spot(false, 1250.0, None).unwrap();
        assert!(spot.is_fallback());
    }

    #[test]
    fn test_invalid_manual_rate() {
        assert!(resolve_spot(true, 0.0, None).unwrap_err().is_invalid_input());
        assert!(resolve_spot(false, -1.0, None).is_err());
        // A good market estimate does not need the manual value.
        assert!(resolve_spot(false, 0.0, Some(Ok(1200.0))).is_ok());
    }
}

//! Scenario matrix configuration.

use serde::{Deserialize, Serialize};

use carry_analytics::{ReturnFormula, DEFAULT_SAMPLES};
use carry_core::{Band, CarryResult};

use crate::error::{Validate, ValidationError};

/// Return formula selection as written in a configuration file.
///
/// ```toml
/// [scenario.formula]
/// kind = "compounded"
/// bond_entry_price = 135.45
/// bond_exit_price = 158.98
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormulaConfig {
    /// Currency return plus a flat bond return.
    Simple {
        /// Bond return in percent; zero for currency only.
        #[serde(default)]
        bond_return_pct: f64,
    },
    /// Currency return plus the holding return of a bond price pair.
    SimpleFromPrices {
        /// Bond price at entry.
        bond_entry_price: f64,
        /// Bond price at exit.
        bond_exit_price: f64,
    },
    /// Currency and bond legs compounded.
    Compounded {
        /// Bond price at entry.
        bond_entry_price: f64,
        /// Bond price at exit.
        bond_exit_price: f64,
    },
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self::Simple {
            bond_return_pct: 0.0,
        }
    }
}

impl FormulaConfig {
    /// Converts to the analytics formula.
    pub fn formula(&self) -> CarryResult<ReturnFormula> {
        match *self {
            Self::Simple { bond_return_pct } => {
                let formula = ReturnFormula::Simple { bond_return_pct };
                formula.validate()?;
                Ok(formula)
            }
            Self::SimpleFromPrices {
                bond_entry_price,
                bond_exit_price,
            } => ReturnFormula::simple_from_prices(bond_entry_price, bond_exit_price),
            Self::Compounded {
                bond_entry_price,
                bond_exit_price,
            } => ReturnFormula::compounded(bond_entry_price, bond_exit_price),
        }
    }
}

/// Scenario matrix parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Entry exchange-rate band.
    pub entry_band: Band,

    /// Exit exchange-rate band.
    pub exit_band: Band,

    /// Points sampled across each band.
    pub samples: usize,

    /// Return formula.
    pub formula: FormulaConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            entry_band: Band {
                low: 1000.0,
                high: 1400.0,
            },
            exit_band: Band {
                low: 950.0,
                high: 1477.0,
            },
            samples: DEFAULT_SAMPLES,
            formula: FormulaConfig::default(),
        }
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.entry_band.validate() {
            errors.push(ValidationError::new("entry_band", e.to_string()));
        }
        if let Err(e) = self.exit_band.validate() {
            errors.push(ValidationError::new("exit_band", e.to_string()));
        }
        if self.samples < 2 {
            errors.push(ValidationError::new(
                "samples",
                format!("At least 2 samples required, got {}", self.samples),
            ));
        }
        if let Err(e) = self.formula.formula() {
            errors.push(ValidationError::new("formula", e.to_string()));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_fx_only_six_by_six() {
        let config = ScenarioConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.samples, 6);
        assert_eq!(config.formula.formula().unwrap(), ReturnFormula::fx_only());
    }

    #[test]
    fn test_formula_conversion() {
        let from_prices = FormulaConfig::SimpleFromPrices {
            bond_entry_price: 135.45,
            bond_exit_price: 158.98,
        };
        let ReturnFormula::Simple { bond_return_pct } = from_prices.formula().unwrap() else {
            panic!("expected simple formula");
        };
        assert_relative_eq!(bond_return_pct, 17.3717, epsilon = 1e-3);

        let compounded = FormulaConfig::Compounded {
            bond_entry_price: 135.45,
            bond_exit_price: 158.98,
        };
        assert!(matches!(
            compounded.formula().unwrap(),
            ReturnFormula::Compounded { .. }
        ));
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let config = ScenarioConfig {
            entry_band: Band {
                low: 1400.0,
                high: 1000.0,
            },
            samples: 1,
            formula: FormulaConfig::Compounded {
                bond_entry_price: 0.0,
                bond_exit_price: 150.0,
            },
            ..ScenarioConfig::default()
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["entry_band", "samples", "formula"]);

        for bond_exit_price in [0.0, -158.98] {
            for formula in [
                FormulaConfig::Compounded {
                    bond_entry_price: 135.45,
                    bond_exit_price,
                },
                FormulaConfig::SimpleFromPrices {
                    bond_entry_price: 135.45,
                    bond_exit_price,
                },
            ] {
                let config = ScenarioConfig {
                    formula,
                    ..ScenarioConfig::default()
                };
                let fields: Vec<String> =
                    config.validate().into_iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["formula"]);
            }
        }
    }
}

//! Top-level configuration object and loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};

use carry_core::ReferenceTable;

use crate::error::{nested, ConfigError, ConfigResult, Validate, ValidationError};
use crate::market::{CorridorConfig, SpotConfig};
use crate::reference::{build_table, builtin_reference_table, validate_records, InstrumentRecord};
use crate::scenario::ScenarioConfig;

/// Complete, immutable configuration for one run.
///
/// Every section is optional in the file; missing sections take the defaults
/// of the dashboard (manual MEP 1250, 1000/1400 corridor from 2025-04-14 at
/// ∓1% a month, a 6×6 currency-only matrix, the built-in instruments).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    /// Spot-rate selection.
    pub spot: SpotConfig,

    /// Crawling-peg corridor.
    pub corridor: CorridorConfig,

    /// Scenario matrix.
    pub scenario: ScenarioConfig,

    /// Reference instruments. `None` uses the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<InstrumentRecord>>,
}

impl CarryConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The configured reference table, or the built-in one.
    pub fn reference_table(&self) -> ConfigResult<ReferenceTable> {
        match &self.instruments {
            Some(records) => build_table(records),
            None => builtin_reference_table(),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Deserialization(e.to_string()))
    }
}

impl Validate for CarryConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = nested("spot", self.spot.validate());
        errors.extend(nested("corridor", self.corridor.validate()));
        errors.extend(nested("scenario", self.scenario.validate()));
        if let Some(records) = &self.instruments {
            errors.extend(validate_records(records));
        }
        errors
    }
}

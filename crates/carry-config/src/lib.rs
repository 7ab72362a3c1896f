//! Carry Configuration Layer
//!
//! Configuration for peso carry-trade analytics: the spot-rate choice, the
//! crawling-peg corridor, scenario matrix parameters and the instrument
//! reference table. A [`CarryConfig`] is built once, validated at load time,
//! and then passed by reference into the calculation functions; nothing in
//! the calculation layer mutates it.
//!
//! # Example
//!
//! ```rust
//! use carry_config::CarryConfig;
//!
//! let config = CarryConfig::from_toml_str(
//!     r#"
//!     [spot]
//!     manual_rate = 1180.0
//!
//!     [scenario.formula]
//!     kind = "simple"
//!     bond_return_pct = 17.04
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.scenario.samples, 6);
//! let table = config.reference_table().unwrap();
//! assert_eq!(table.len(), 24);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod market;
mod reference;
mod scenario;
mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use market::{CorridorConfig, SpotConfig};
pub use reference::{build_table, builtin_records, builtin_reference_table, InstrumentRecord};
pub use scenario::{FormulaConfig, ScenarioConfig};
pub use settings::CarryConfig;

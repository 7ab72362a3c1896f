//! # Carry Analytics
//!
//! Pure calculation engines for peso carry trades against the US dollar:
//!
//! - **Break-even**: the exit exchange rate at which holding a peso
//!   instrument to maturity neither gains nor loses in dollar terms
//! - **Corridor**: crawling-peg band projection and where each break-even
//!   falls relative to it
//! - **Scenario**: return matrices over hypothetical entry/exit exchange rates
//! - **Spot**: MEP estimation from a feed of closes, with manual fallback
//!
//! Every function is a deterministic function of its inputs. Nothing here
//! reads files, talks to the network or keeps state between calls.
//!
//! ## Usage
//!
//! ```rust
//! use carry_analytics::prelude::*;
//! use carry_core::prelude::*;
//!
//! let table = ReferenceTable::from_instruments([
//!     Instrument::new("S30J5", Date::from_ymd(2025, 6, 30).unwrap(), 146.607).unwrap(),
//! ])
//! .unwrap();
//! let quotes: QuoteBook = [Quote::new("S30J5", 146.607)].into_iter().collect();
//!
//! let results = compute_breakevens(1250.0, &table, &quotes).unwrap();
//! assert_eq!(results[0].breakeven, 1250.0);
//!
//! let matrix = compute_matrix(
//!     Band::new(1000.0, 1400.0).unwrap(),
//!     Band::new(950.0, 1477.0).unwrap(),
//!     ReturnFormula::fx_only(),
//!     DEFAULT_SAMPLES,
//! )
//! .unwrap();
//! assert_eq!(matrix.dimensions(), (6, 6));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]

pub mod band;
pub mod breakeven;
pub mod scenario;
pub mod spot;

pub use band::{
    classify, classify_result, elapsed_months, project_band, project_band_with_divisor,
    BandCorridor, BandLeg, BandPosition, CorridorPoint, CorridorPosition,
    DEFAULT_DAY_COUNT_DIVISOR,
};
pub use breakeven::{
    compute_breakevens, compute_breakevens_with_report, BreakEvenReport, BreakEvenResult,
    Exclusion, MissingDataReason,
};
pub use scenario::{
    band_samples, compute_matrix, holding_return_pct, ReturnFormula, ScenarioCell,
    ScenarioMatrix, DEFAULT_SAMPLES,
};
pub use spot::{mep_from_closes, resolve_spot, SpotSelection};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::band::{classify, project_band, BandCorridor, BandLeg, BandPosition};
    pub use crate::breakeven::{compute_breakevens, compute_breakevens_with_report};
    pub use crate::breakeven::{BreakEvenReport, BreakEvenResult};
    pub use crate::scenario::{compute_matrix, ReturnFormula, ScenarioCell, ScenarioMatrix};
    pub use crate::scenario::DEFAULT_SAMPLES;
    pub use crate::spot::{mep_from_closes, resolve_spot, SpotSelection};
}

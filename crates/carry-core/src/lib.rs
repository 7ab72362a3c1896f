//! # Carry Core
//!
//! Core types and error taxonomy for peso carry-trade analytics.
//!
//! This crate provides the building blocks shared by the rest of the workspace:
//!
//! - **Types**: `Date`, `InstrumentId`, `Instrument`, `Quote`, `Band`
//! - **Tables**: `ReferenceTable` (identifier → maturity/payoff, validated on insert)
//!   and `QuoteBook` (identifier → last price, possibly missing or non-positive)
//! - **Errors**: `CarryError` with the `InvalidInput` / `MissingData` split
//!
//! Nothing in here performs I/O. Market data and reference files are read by
//! `carry-ext-file`; configuration is loaded by `carry-config`.
//!
//! ## Example
//!
//! ```rust
//! use carry_core::prelude::*;
//!
//! let mut table = ReferenceTable::new();
//! table
//!     .insert(Instrument::new("S30J5", Date::from_ymd(2025, 6, 30).unwrap(), 146.607).unwrap())
//!     .unwrap();
//!
//! let mut quotes = QuoteBook::new();
//! quotes.insert(Quote::new("S30J5", 131.5));
//!
//! assert_eq!(quotes.usable_price(&InstrumentId::new("S30J5")), Some(131.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CarryError, CarryResult};
    pub use crate::types::{
        Band, Date, Instrument, InstrumentId, Quote, QuoteBook, ReferenceTable,
    };
}

// Re-export commonly used types at crate root
pub use error::{CarryError, CarryResult};
pub use types::{Band, Date, Instrument, InstrumentId, Quote, QuoteBook, ReferenceTable};

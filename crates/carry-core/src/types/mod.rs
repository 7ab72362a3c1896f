//! Domain types for carry-trade analytics.
//!
//! - [`Date`]: Calendar date
//! - [`InstrumentId`]: Ticker of a peso-denominated note or bond
//! - [`Instrument`]: Static reference record (maturity, payoff at maturity)
//! - [`ReferenceTable`]: Typed identifier → instrument mapping
//! - [`Quote`] / [`QuoteBook`]: Market prices supplied by an external feed
//! - [`Band`]: Lower/upper bound pair on a price axis

mod band;
mod date;
mod instrument;
mod quote;

pub use band::Band;
pub use date::Date;
pub use instrument::{Instrument, InstrumentId, ReferenceTable};
pub use quote::{Quote, QuoteBook};

//! # Carry Ext File
//!
//! File-based market data and reference data sources.
//!
//! - JSON market rows in the layout of the public Argentine market-data feed
//!   (`symbol` plus a `c` or `close` price), one array per file
//! - JSON MEP feed, reduced to its closes
//! - CSV quotes (`symbol,price`) and CSV reference tables
//!   (`symbol,maturity,payoff`)
//!
//! These sources are the boundary between the outside world and the pure
//! calculation crates; nothing in `carry-analytics` depends on this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod reference_data;

pub use market_data::*;
pub use reference_data::*;

use thiserror::Error;

use carry_core::{CarryError, QuoteBook};

/// Error type for file sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Parse/deserialization error.
    #[error("parse error in {path}: {reason}")]
    ParseError {
        /// File being parsed.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parsed values were rejected by a domain type.
    #[error(transparent)]
    Domain(#[from] CarryError),
}

/// A source of market quotes.
pub trait QuoteSource {
    /// Short description used in log messages.
    fn describe(&self) -> String;

    /// Loads every quote the source has.
    fn load(&self) -> Result<QuoteBook, SourceError>;
}

/// Loads and merges quotes from several sources, in order.
///
/// Later sources replace earlier quotes for the same identifier, except that
/// a row without a price never replaces one with a price.
pub fn load_quotes(sources: &[Box<dyn QuoteSource>]) -> Result<QuoteBook, SourceError> {
    let mut book = QuoteBook::new();
    for source in sources {
        let quotes = source.load()?;
        log::debug!("{} quotes from {}", quotes.len(), source.describe());
        book.extend(quotes);
    }
    Ok(book)
}

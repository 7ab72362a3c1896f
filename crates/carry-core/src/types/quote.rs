//! Market quotes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::InstrumentId;

/// Last traded/close price for one instrument.
///
/// The price is whatever the feed supplied. It may be absent, zero, negative
/// or NaN; consumers decide what counts as usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Quoted price, if the feed had one.
    pub price: Option<f64>,
}

impl Quote {
    /// Creates a quote with a price.
    pub fn new(id: impl Into<InstrumentId>, price: f64) -> Self {
        Self {
            id: id.into(),
            price: Some(price),
        }
    }

    /// Creates a quote row that carried no price.
    pub fn empty(id: impl Into<InstrumentId>) -> Self {
        Self {
            id: id.into(),
            price: None,
        }
    }

    /// Returns the price if it is finite and strictly positive.
    pub fn usable_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// Identifier → quote mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteBook {
    quotes: HashMap<InstrumentId, Quote>,
}

impl QuoteBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a quote, replacing any previous quote for the same identifier.
    ///
    /// A row without a price never replaces one that has a price, so merging
    /// feeds where an instrument appears twice keeps the informative row.
    pub fn insert(&mut self, quote: Quote) {
        if let Some(existing) = self.quotes.get(&quote.id) {
            if quote.price.is_none() && existing.price.is_some() {
                log::debug!("ignoring empty duplicate quote for {}", quote.id);
                return;
            }
            log::debug!("replacing quote for {}", quote.id);
        }
        self.quotes.insert(quote.id.clone(), quote);
    }

    /// Merges another book into this one, using [`QuoteBook::insert`] rules.
    pub fn extend(&mut self, other: QuoteBook) {
        for quote in other.quotes.into_values() {
            self.insert(quote);
        }
    }

    /// Looks up the raw quote.
    pub fn get(&self, id: &InstrumentId) -> Option<&Quote> {
        self.quotes.get(id)
    }

    /// Returns the price if present, finite and strictly positive.
    pub fn usable_price(&self, id: &InstrumentId) -> Option<f64> {
        self.get(id).and_then(Quote::usable_price)
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates over quotes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }
}

impl FromIterator<Quote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut book = Self::new();
        for quote in iter {
            book.insert(quote);
        }
        book
    }
}

impl FromIterator<(InstrumentId, f64)> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = (InstrumentId, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(id, price)| Quote::new(id, price))
            .collect()
    }
}

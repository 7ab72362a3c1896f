//! File-based market data sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use carry_core::{Quote, QuoteBook};

use crate::{QuoteSource, SourceError};

// =============================================================================
// JSON MARKET ROWS
// =============================================================================

/// One row of a market-data feed.
///
/// Only the fields the analytics need are read; everything else in the row
/// is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketRow {
    /// Ticker. Some feeds call it `ticker`.
    #[serde(default, alias = "ticker")]
    pub symbol: Option<String>,
    /// Last price.
    #[serde(default)]
    pub c: Option<f64>,
    /// Close price.
    #[serde(default)]
    pub close: Option<f64>,
}

impl MarketRow {
    /// Last traded price, falling back to the close.
    pub fn last_price(&self) -> Option<f64> {
        self.c.or(self.close)
    }

    /// Close price, falling back to the last traded price.
    pub fn close_price(&self) -> Option<f64> {
        self.close.or(self.c)
    }
}

/// Parses a JSON array of market rows.
pub fn parse_market_rows(content: &str, origin: &str) -> Result<Vec<MarketRow>, SourceError> {
    serde_json::from_str(content).map_err(|e| SourceError::ParseError {
        path: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Converts market rows to quotes. Rows without a symbol are skipped.
pub fn rows_to_quotes(rows: &[MarketRow]) -> QuoteBook {
    let mut book = QuoteBook::new();
    for row in rows {
        let Some(symbol) = row.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            log::debug!("skipping market row without symbol");
            continue;
        };
        book.insert(match row.last_price() {
            Some(price) => Quote::new(symbol, price),
            None => Quote::empty(symbol),
        });
    }
    book
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

// =============================================================================
// JSON QUOTE SOURCE
// =============================================================================

/// Quotes from one or more JSON market-data files.
///
/// Files are merged in order, so a notes file and a bonds file can be read
/// as one feed.
#[derive(Debug, Clone)]
pub struct JsonQuoteSource {
    file_paths: Vec<PathBuf>,
}

impl JsonQuoteSource {
    /// Create a source over the given files.
    pub fn new<P: AsRef<Path>>(file_paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            file_paths: file_paths
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
        }
    }
}

impl QuoteSource for JsonQuoteSource {
    fn describe(&self) -> String {
        let names: Vec<String> = self
            .file_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        format!("json [{}]", names.join(", "))
    }

    fn load(&self) -> Result<QuoteBook, SourceError> {
        let mut book = QuoteBook::new();
        for path in &self.file_paths {
            let content = read_file(path)?;
            let rows = parse_market_rows(&content, &path.display().to_string())?;
            book.extend(rows_to_quotes(&rows));
        }
        Ok(book)
    }
}

// =============================================================================
// CSV QUOTE SOURCE
// =============================================================================

/// CSV record for quotes.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    symbol: String,
    price: Option<f64>,
}

/// CSV-based quote source (`symbol,price`). Empty price cells are kept as
/// quotes without a price.
#[derive(Debug, Clone)]
pub struct CsvQuoteSource {
    file_path: PathBuf,
}

impl CsvQuoteSource {
    /// Create a new CSV quote source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl QuoteSource for CsvQuoteSource {
    fn describe(&self) -> String {
        format!("csv {}", self.file_path.display())
    }

    fn load(&self) -> Result<QuoteBook, SourceError> {
        if !self.file_path.exists() {
            return Err(SourceError::NotFound(self.file_path.display().to_string()));
        }

        let parse_error = |e: csv::Error| SourceError::ParseError {
            path: self.file_path.display().to_string(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(parse_error)?;

        let mut book = QuoteBook::new();
        for result in reader.deserialize() {
            let record: QuoteRecord = result.map_err(parse_error)?;
            book.insert(match record.price {
                Some(price) => Quote::new(record.symbol, price),
                None => Quote::empty(record.symbol),
            });
        }
        Ok(book)
    }
}

// =============================================================================
// JSON MEP SOURCE
// =============================================================================

/// The MEP feed: a JSON array of rows whose closes estimate the spot rate.
#[derive(Debug, Clone)]
pub struct JsonMepSource {
    file_path: PathBuf,
}

impl JsonMepSource {
    /// Create a new MEP source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Every close in the feed, including unusable ones.
    pub fn closes(&self) -> Result<Vec<f64>, SourceError> {
        let content = read_file(&self.file_path)?;
        let rows = parse_market_rows(&content, &self.file_path.display().to_string())?;
        Ok(rows.iter().filter_map(MarketRow::close_price).collect())
    }
}

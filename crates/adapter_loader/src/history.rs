//! Daily price histories read from CSV.
//!
//! Expected layout: a header row whose first column is the date and whose
//! remaining columns are tickers, then one row per trading day.
//!
//! ```text
//! Date,SPY,AGG
//! 2023-01-03,380.82,98.04
//! 2023-01-04,383.76,98.51
//! ```
//!
//! Rows with a missing or non-numeric price in any selected column are
//! dropped with a warning, so every kept row is complete.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use folio_models::estimation::{estimate_parameters, simple_returns, TRADING_DAYS_PER_YEAR};
use folio_models::AssetParameters;
use tracing::{debug, info, warn};

use crate::error::LoaderError;

/// Minimum complete rows for estimation: two returns need three prices.
pub const MIN_ROWS: usize = 3;

/// Row and column selection applied while loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Columns to keep, in this order; `None` keeps every ticker.
    pub tickers: Option<Vec<String>>,
    /// First date kept (inclusive).
    pub start: Option<NaiveDate>,
    /// Last date kept (inclusive).
    pub end: Option<NaiveDate>,
}

impl LoadOptions {
    /// Keep only `tickers`.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Some(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Keep rows in `[start, end]`.
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Dense matrix of daily prices, rows ordered by date.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceHistory {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    prices: Vec<Vec<f64>>,
}

fn parse_date(value: &str, line: u64) -> Result<NaiveDate, LoaderError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|d| d.date()))
        .map_err(|_| LoaderError::InvalidDate {
            line,
            value: value.to_string(),
        })
}

fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

impl PriceHistory {
    /// Reads a history from a CSV file.
    pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading price history");
        Self::from_reader(file, options)
    }

    /// Reads a history from any CSV source.
    ///
    /// # Errors
    ///
    /// - `EmptyHeader` if the header has no ticker columns
    /// - `MissingTicker` if a selected ticker is not a column
    /// - `InvalidDate` for an unparseable date cell
    /// - `InsufficientRows` if fewer than [`MIN_ROWS`] complete rows remain
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, LoaderError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
        if header.len() < 2 {
            return Err(LoaderError::EmptyHeader);
        }
        let available = &header[1..];

        let (tickers, columns): (Vec<String>, Vec<usize>) = match &options.tickers {
            Some(wanted) => wanted
                .iter()
                .map(|t| {
                    available
                        .iter()
                        .position(|a| a.eq_ignore_ascii_case(t))
                        .map(|i| (available[i].clone(), i + 1))
                        .ok_or_else(|| LoaderError::MissingTicker(t.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .unzip(),
            None => available
                .iter()
                .enumerate()
                .map(|(i, t)| (t.clone(), i + 1))
                .unzip(),
        };

        let mut dates = Vec::new();
        let mut prices = Vec::new();
        let mut dropped = 0usize;

        for record in csv.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let date = parse_date(record.get(0).unwrap_or_default(), line)?;
            if !options.in_range(date) {
                continue;
            }

            let row: Option<Vec<f64>> = columns
                .iter()
                .map(|&c| record.get(c).and_then(parse_price))
                .collect();
            match row {
                Some(row) => {
                    dates.push(date);
                    prices.push(row);
                }
                None => {
                    dropped += 1;
                    debug!(line, %date, "incomplete price row");
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, "dropped price rows with missing or invalid prices");
        }

        let mut history = Self {
            dates,
            tickers,
            prices,
        };
        history.sort_by_date();
        history.check_rows()?;

        info!(
            rows = history.len(),
            tickers = ?history.tickers,
            "price history loaded"
        );
        Ok(history)
    }

    /// Builds a history from already parsed columns.
    ///
    /// # Errors
    ///
    /// `EmptyHeader` with no tickers, `LengthMismatch` or `RaggedRow` for
    /// inconsistent shapes, `InsufficientRows` with fewer than [`MIN_ROWS`] rows.
    pub fn new(
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        prices: Vec<Vec<f64>>,
    ) -> Result<Self, LoaderError> {
        if tickers.is_empty() {
            return Err(LoaderError::EmptyHeader);
        }
        if dates.len() != prices.len() {
            return Err(LoaderError::LengthMismatch {
                dates: dates.len(),
                rows: prices.len(),
            });
        }
        if let Some((row, values)) = prices
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != tickers.len())
        {
            return Err(LoaderError::RaggedRow {
                row,
                expected: tickers.len(),
                got: values.len(),
            });
        }
        let mut history = Self {
            dates,
            tickers,
            prices,
        };
        history.sort_by_date();
        history.check_rows()?;
        Ok(history)
    }

    fn sort_by_date(&mut self) {
        if self.dates.windows(2).all(|w| w[0] <= w[1]) {
            return;
        }
        let mut order: Vec<usize> = (0..self.dates.len()).collect();
        order.sort_by_key(|&i| self.dates[i]);
        self.dates = order.iter().map(|&i| self.dates[i]).collect();
        self.prices = order.iter().map(|&i| self.prices[i].clone()).collect();
    }

    fn check_rows(&self) -> Result<(), LoaderError> {
        if self.prices.len() < MIN_ROWS {
            return Err(LoaderError::InsufficientRows {
                got: self.prices.len(),
                need: MIN_ROWS,
            });
        }
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the history has no rows.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Row dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column names.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Price rows, one value per ticker.
    pub fn prices(&self) -> &[Vec<f64>] {
        &self.prices
    }

    /// Most recent price of every ticker.
    pub fn last_prices(&self) -> Option<&[f64]> {
        self.prices.last().map(Vec::as_slice)
    }

    /// Daily simple returns, one row fewer than prices.
    pub fn returns(&self) -> Result<Vec<Vec<f64>>, LoaderError> {
        Ok(simple_returns(&self.prices)?)
    }

    /// Annualised drift, volatility and correlation estimated from the history.
    pub fn estimate_parameters(&self) -> Result<AssetParameters, LoaderError> {
        Ok(estimate_parameters(&self.prices, TRADING_DAYS_PER_YEAR)?)
    }
}

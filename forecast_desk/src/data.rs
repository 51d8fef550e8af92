//! Price history providers
//!
//! The engine accepts any chronologically ordered series of closes. This
//! module resolves a symbol to such a series: from memory, from a
//! deterministic random walk, or from a CSV file.

use crate::config::SyntheticConfig;
use crate::error::{DeskError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Floor applied to generated prices so the walk stays positive
const MIN_SYNTHETIC_PRICE: f64 = 0.01;

/// Resolves an instrument symbol to its closing price history
pub trait PriceHistoryProvider {
    /// Closing prices in ascending chronological order
    fn price_history(&self, symbol: &str) -> Result<Vec<f64>>;
}

/// Fixed symbol to series map
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceHistory {
    series: HashMap<String, Vec<f64>>,
}

impl InMemoryPriceHistory {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the history of a symbol
    pub fn insert(&mut self, symbol: impl Into<String>, closes: Vec<f64>) {
        self.series.insert(symbol.into(), closes);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_series(mut self, symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        self.insert(symbol, closes);
        self
    }
}

impl PriceHistoryProvider for InMemoryPriceHistory {
    fn price_history(&self, symbol: &str) -> Result<Vec<f64>> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DeskError::UnknownSymbol(symbol.to_string()))
    }
}

/// Deterministic random-walk histories, one per symbol.
///
/// The walk for a symbol depends only on the configuration and the symbol,
/// so repeated requests return identical series.
#[derive(Debug, Clone)]
pub struct SyntheticPriceHistory {
    config: SyntheticConfig,
    returns: Normal<f64>,
}

impl SyntheticPriceHistory {
    /// Create a generator from validated parameters
    pub fn new(config: SyntheticConfig) -> Result<Self> {
        let returns = Normal::new(config.daily_drift, config.daily_volatility)
            .map_err(|e| DeskError::Config(format!("Invalid synthetic distribution: {}", e)))?;

        Ok(Self { config, returns })
    }

    /// Seed for a symbol, mixed from the base seed and a hash of the symbol
    pub fn symbol_seed(&self, symbol: &str) -> u64 {
        let hash = blake3::hash(symbol.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes) ^ self.config.seed
    }
}

impl PriceHistoryProvider for SyntheticPriceHistory {
    fn price_history(&self, symbol: &str) -> Result<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut price = self.config.start_price;
        let mut closes = Vec::with_capacity(self.config.length);
        closes.push(price);

        for _ in 1..self.config.length {
            let change = self.returns.sample(&mut rng);
            price = (price * (1.0 + change)).max(MIN_SYNTHETIC_PRICE);
            closes.push(price);
        }

        debug!(symbol, closes = closes.len(), "generated synthetic history");
        Ok(closes)
    }
}

/// Data loader for closing prices stored in CSV files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load closes from a CSV file with a header row.
    ///
    /// Uses the `close` column, or failing that the first column whose name
    /// contains `price`. Rows are kept in file order.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load closes from any CSV source
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Vec<f64>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let column = Self::detect_close_column(reader.headers()?)?;

        let mut closes = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let cell = record.get(column).ok_or_else(|| {
                DeskError::DataError(format!("Row {} has no column {}", row + 1, column))
            })?;
            let close = cell.parse::<f64>().map_err(|e| {
                DeskError::DataError(format!("Row {}: cannot parse '{}': {}", row + 1, cell, e))
            })?;
            closes.push(close);
        }

        debug!(rows = closes.len(), "loaded closes from csv");
        Ok(closes)
    }

    /// Detect the close column in a header row
    fn detect_close_column(headers: &csv::StringRecord) -> Result<usize> {
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        names
            .iter()
            .position(|name| name == "close")
            .or_else(|| names.iter().position(|name| name.contains("close")))
            .or_else(|| names.iter().position(|name| name.contains("price")))
            .ok_or_else(|| DeskError::DataError("No close or price column found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lookup() {
        let provider = InMemoryPriceHistory::new().with_series("AAPL", vec![1.0, 2.0]);

        assert_eq!(provider.price_history("AAPL").unwrap(), vec![1.0, 2.0]);
        assert!(matches!(
            provider.price_history("MSFT"),
            Err(DeskError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn test_synthetic_is_deterministic_per_symbol() {
        let provider = SyntheticPriceHistory::new(SyntheticConfig::default()).unwrap();

        let a = provider.price_history("AAPL").unwrap();
        let b = provider.price_history("AAPL").unwrap();
        let c = provider.price_history("TSLA").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 90);
        assert_eq!(a[0], 100.0);
        assert!(a.iter().all(|p| p.is_finite() && *p > 0.0));
    }

    #[test]
    fn test_synthetic_zero_volatility_follows_drift() {
        let config = SyntheticConfig {
            length: 4,
            start_price: 10.0,
            daily_drift: 0.1,
            daily_volatility: 0.0,
            ..SyntheticConfig::default()
        };
        let closes = SyntheticPriceHistory::new(config)
            .unwrap()
            .price_history("X")
            .unwrap();

        assert!((closes[3] - 10.0 * 1.1f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn test_detect_close_column() {
        let headers = csv::StringRecord::from(vec!["date", "open", "Close", "volume"]);
        assert_eq!(DataLoader::detect_close_column(&headers).unwrap(), 2);

        let headers = csv::StringRecord::from(vec!["date", "price"]);
        assert_eq!(DataLoader::detect_close_column(&headers).unwrap(), 1);

        let headers = csv::StringRecord::from(vec!["date", "volume"]);
        assert!(DataLoader::detect_close_column(&headers).is_err());
    }

    #[test]
    fn test_from_reader_parses_rows() {
        let csv = "date,close\n2024-01-02, 101.5\n2024-01-03,102.25\n";
        let closes = DataLoader::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(closes, vec![101.5, 102.25]);
    }

    #[test]
    fn test_from_reader_rejects_bad_cell() {
        let csv = "date,close\n2024-01-02,abc\n";
        let err = DataLoader::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DeskError::DataError(_)));
    }
}

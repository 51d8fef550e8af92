//! Error types for the forecast_desk crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the forecast_desk crate
#[derive(Debug, Error)]
pub enum DeskError {
    /// The engine rejected the price series
    #[error("Forecast error: {0}")]
    Math(#[from] MathError),

    /// Error related to loading or parsing price data
    #[error("Data error: {0}")]
    DataError(String),

    /// No price history is known for the symbol
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Invalid configuration values
    #[error("Config error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error parsing a TOML configuration file
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DeskError>;

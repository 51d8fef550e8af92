//! # Forecast Math
//!
//! Technical indicators and a composite short-horizon price forecaster.
//!
//! Every function in this crate is a pure computation over a slice of
//! chronologically ordered closing prices. Nothing is cached between calls
//! and no I/O is performed, so the same input always yields the same output.
//!
//! ## Example
//!
//! ```
//! use forecast_math::forecasting::{forecast, Trend};
//!
//! let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
//! let result = forecast(&prices).unwrap();
//!
//! assert_eq!(result.predictions.len(), 7);
//! assert_eq!(result.trend, Trend::Bullish);
//! ```

use thiserror::Error;

// Indicator modules
pub mod forecasting;
pub mod moving_averages;
pub mod oscillators;
pub mod validation;
pub mod volatility;

pub use forecasting::{
    forecast, ForecastPoint, ForecastResult, IndicatorSnapshot, Signal, Trend,
};
pub use validation::{validate_series, MIN_FORECAST_HISTORY};

/// Errors that can occur in indicator and forecast calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The series is too short, or contains non-finite or non-positive prices
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),
}

/// Result type for forecast math operations
pub type Result<T> = std::result::Result<T, MathError>;

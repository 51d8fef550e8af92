//! # Price Forecast
//!
//! Facade over the workspace crates:
//!
//! - [`math`]: technical indicators and the composite seven day forecaster
//! - [`desk`]: history providers, forecast cache and configuration
//!
//! ## Example
//!
//! ```
//! use price_forecast_workspace::math::{forecast, Signal};
//!
//! let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
//! let result = forecast(&prices).unwrap();
//! assert_eq!(result.signal, Signal::Buy);
//! ```

pub use forecast_desk as desk;
pub use forecast_math as math;

pub use forecast_desk::{DeskConfig, DeskError, ForecastDesk};
pub use forecast_math::{forecast, ForecastResult, MathError, Signal, Trend};

//! Price series validation

use crate::{MathError, Result};

/// Minimum number of closes required for a full forecast
pub const MIN_FORECAST_HISTORY: usize = 50;

/// Check that `prices` holds at least `min_len` finite, strictly positive values.
///
/// Returns the series unchanged on success.
pub fn validate_prices(prices: &[f64], min_len: usize) -> Result<&[f64]> {
    if prices.len() < min_len {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} prices, have {}.",
            min_len,
            prices.len()
        )));
    }

    if let Some((index, price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(MathError::InsufficientData(format!(
            "Price at index {} is not a finite positive number: {}",
            index, price
        )));
    }

    Ok(prices)
}

/// Validate a series for forecasting (length ≥ [`MIN_FORECAST_HISTORY`])
pub fn validate_series(prices: &[f64]) -> Result<&[f64]> {
    validate_prices(prices, MIN_FORECAST_HISTORY)
}

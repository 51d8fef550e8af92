//! Volatility calculations
//!
//! Realized volatility here is the annualized population standard deviation
//! of simple daily returns, expressed as a percentage.

/// Trading days per year used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple returns `(p[i] - p[i-1]) / p[i-1]` for consecutive prices.
///
/// A return whose previous price is zero is reported as 0.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

/// Population standard deviation, 0 for an empty slice.
///
/// Uses Welford's running update, so a slice of identical values yields
/// exactly 0.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let delta = value - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (value - mean);
    }

    (m2 / values.len() as f64).sqrt()
}

/// Annualize a daily standard deviation
pub fn annualize(daily_std_dev: f64) -> f64 {
    daily_std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized volatility in percent, or 0 with fewer than two prices
pub fn volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    annualize(population_std_dev(&daily_returns(prices))) * 100.0
}

//! Oscillator indicator implementations
//!
//! Contains implementations of the momentum oscillators used by the forecaster:
//! - Relative Strength Index (RSI)
//! - Moving Average Convergence Divergence (MACD)
//!
//! Short histories are not errors. RSI falls back to the neutral 50 and
//! MACD to 0 so that composite arithmetic never has to branch.

use crate::moving_averages::ExponentialMovingAverage;

/// Default RSI look-back period
pub const RSI_PERIOD: usize = 14;
/// RSI value reported when there is not enough history
pub const NEUTRAL_RSI: f64 = 50.0;
/// Fast EMA period of the MACD line
pub const MACD_FAST: usize = 12;
/// Slow EMA period of the MACD line
pub const MACD_SLOW: usize = 26;

/// Relative Strength Index (RSI) implementation with Wilder smoothing
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    previous_price: Option<f64>,
    seed_gain: f64,
    seed_loss: f64,
    deltas_seen: usize,
    avg_gain: Option<f64>,
    avg_loss: Option<f64>,
}

impl RelativeStrengthIndex {
    /// Create a new RSI with the specified period.
    ///
    /// Returns `None` for a zero period.
    pub fn new(period: usize) -> Option<Self> {
        if period == 0 {
            return None;
        }

        Some(Self {
            period,
            previous_price: None,
            seed_gain: 0.0,
            seed_loss: 0.0,
            deltas_seen: 0,
            avg_gain: None,
            avg_loss: None,
        })
    }

    /// Update the RSI with a new price value
    pub fn update(&mut self, price: f64) {
        if let Some(prev_price) = self.previous_price {
            let change = price - prev_price;
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            self.deltas_seen += 1;

            match (self.avg_gain, self.avg_loss) {
                (Some(avg_gain), Some(avg_loss)) => {
                    // new_avg = (prev_avg * (period - 1) + current_value) / period
                    let period = self.period as f64;
                    self.avg_gain = Some((avg_gain * (period - 1.0) + gain) / period);
                    self.avg_loss = Some((avg_loss * (period - 1.0) + loss) / period);
                }
                _ => {
                    self.seed_gain += gain;
                    self.seed_loss += loss;

                    // Initial averages are plain means over the first `period` deltas
                    if self.deltas_seen == self.period {
                        self.avg_gain = Some(self.seed_gain / self.period as f64);
                        self.avg_loss = Some(self.seed_loss / self.period as f64);
                    }
                }
            }
        }

        self.previous_price = Some(price);
    }

    /// Get the current RSI value (0-100), or the neutral 50 with too little history
    pub fn value(&self) -> f64 {
        match (self.avg_gain, self.avg_loss) {
            (Some(_), Some(avg_loss)) if avg_loss == 0.0 => 100.0,
            (Some(avg_gain), Some(avg_loss)) => {
                let rs = avg_gain / avg_loss;
                100.0 - (100.0 / (1.0 + rs))
            }
            _ => NEUTRAL_RSI,
        }
    }

    /// Whether enough prices have been seen for a computed (non-default) value
    pub fn is_ready(&self) -> bool {
        self.avg_gain.is_some()
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the RSI, clearing all values
    pub fn reset(&mut self) {
        self.previous_price = None;
        self.seed_gain = 0.0;
        self.seed_loss = 0.0;
        self.deltas_seen = 0;
        self.avg_gain = None;
        self.avg_loss = None;
    }
}

/// Moving Average Convergence Divergence line (fast EMA minus slow EMA)
#[derive(Debug, Clone)]
pub struct Macd {
    fast_ema: ExponentialMovingAverage,
    slow_ema: ExponentialMovingAverage,
}

impl Macd {
    /// Create a new MACD with the specified EMA periods.
    ///
    /// Returns `None` when either period is zero or `fast_period >= slow_period`.
    pub fn new(fast_period: usize, slow_period: usize) -> Option<Self> {
        if fast_period >= slow_period {
            return None;
        }

        Some(Self {
            fast_ema: ExponentialMovingAverage::new(fast_period)?,
            slow_ema: ExponentialMovingAverage::new(slow_period)?,
        })
    }

    /// Update the MACD with a new price value
    pub fn update(&mut self, price: f64) {
        self.fast_ema.update(price);
        self.slow_ema.update(price);
    }

    /// Current MACD line value, or 0 until the slow EMA has a full window
    pub fn value(&self) -> f64 {
        match (self.fast_ema.value(), self.slow_ema.value()) {
            (Some(fast), Some(slow)) => fast - slow,
            _ => 0.0,
        }
    }

    /// Get the fast period
    pub fn fast_period(&self) -> usize {
        self.fast_ema.period()
    }

    /// Get the slow period
    pub fn slow_period(&self) -> usize {
        self.slow_ema.period()
    }

    /// Reset the MACD, clearing all values
    pub fn reset(&mut self) {
        self.fast_ema.reset();
        self.slow_ema.reset();
    }
}

/// Relative Strength Index of the whole series.
///
/// Returns 50 when fewer than `period + 1` prices are available and 100 when
/// the smoothed average loss is exactly zero.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    let Some(mut indicator) = RelativeStrengthIndex::new(period) else {
        return NEUTRAL_RSI;
    };

    for &price in prices {
        indicator.update(price);
    }

    indicator.value()
}

/// MACD line `EMA12 - EMA26` at the last price, or 0 with fewer than 26 prices
pub fn macd(prices: &[f64]) -> f64 {
    let Some(mut indicator) = Macd::new(MACD_FAST, MACD_SLOW) else {
        return 0.0;
    };

    for &price in prices {
        indicator.update(price);
    }

    indicator.value()
}

//! Moving average calculation implementations
//!
//! Contains implementations of the two moving average types the forecaster uses:
//! - Simple Moving Average (SMA)
//! - Exponential Moving Average (EMA)
//!
//! Each comes in a streaming form (`update` one price at a time) and a slice
//! form (`sma`, `ema`) built on top of it. Insufficient history is not an
//! error here: the slice forms return an empty sequence so that callers can
//! pick their own fallback.

use std::collections::VecDeque;

/// Simple Moving Average (SMA) implementation
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period.
    ///
    /// Returns `None` for a zero period.
    pub fn new(period: usize) -> Option<Self> {
        if period == 0 {
            return None;
        }

        Some(Self {
            period,
            values: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        })
    }

    /// Update the SMA with a new value, returning the average once the window is full
    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);
        self.sum += value;

        // Remove oldest value if we have more than period values
        if self.values.len() > self.period {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }

        self.value()
    }

    /// Get the current SMA value
    pub fn value(&self) -> Option<f64> {
        if self.values.len() < self.period {
            return None;
        }

        Some(self.sum / self.period as f64)
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the SMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

/// Exponential Moving Average (EMA) implementation
///
/// The average is seeded with the first raw value rather than with the SMA
/// of the first `period` values. This is a simplified approximation of the
/// textbook EMA and every downstream MACD value depends on it.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    period: usize,
    multiplier: f64,
    current_ema: Option<f64>,
    values_seen: usize,
}

impl ExponentialMovingAverage {
    /// Create a new Exponential Moving Average with the specified period.
    ///
    /// Returns `None` for a zero period.
    pub fn new(period: usize) -> Option<Self> {
        if period == 0 {
            return None;
        }

        let multiplier = 2.0 / (period as f64 + 1.0);

        Some(Self {
            period,
            multiplier,
            current_ema: None,
            values_seen: 0,
        })
    }

    /// Update the EMA with a new value and return the smoothed value
    pub fn update(&mut self, value: f64) -> f64 {
        self.values_seen += 1;

        let next = match self.current_ema {
            None => value,
            // EMA = price * k + EMA(previous) * (1 - k)
            Some(current) => value * self.multiplier + current * (1.0 - self.multiplier),
        };
        self.current_ema = Some(next);

        next
    }

    /// Get the current EMA value, once at least `period` values have been seen
    pub fn value(&self) -> Option<f64> {
        if self.values_seen < self.period {
            return None;
        }

        self.current_ema
    }

    /// Smoothing factor `k = 2 / (period + 1)`
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the EMA, clearing all values
    pub fn reset(&mut self) {
        self.current_ema = None;
        self.values_seen = 0;
    }
}

/// Simple moving average over every full trailing window.
///
/// The first entry corresponds to index `period - 1` of `series`. Returns an
/// empty vector when `series.len() < period` or `period == 0`.
pub fn sma(series: &[f64], period: usize) -> Vec<f64> {
    let Some(mut average) = SimpleMovingAverage::new(period) else {
        return Vec::new();
    };

    series
        .iter()
        .filter_map(|&price| average.update(price))
        .collect()
}

/// Exponential moving average, one entry per input price.
///
/// Returns an empty vector when `series.len() < period` or `period == 0`.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    let Some(mut average) = ExponentialMovingAverage::new(period) else {
        return Vec::new();
    };
    if series.len() < period {
        return Vec::new();
    }

    series.iter().map(|&price| average.update(price)).collect()
}

/// Most recent SMA value, or `0.0` when there is not enough history
pub fn last_sma(series: &[f64], period: usize) -> f64 {
    if period == 0 || series.len() < period {
        return 0.0;
    }

    // Scale before summing so closes near f64::MAX do not overflow
    let n = period as f64;
    series[series.len() - period..].iter().map(|p| p / n).sum()
}

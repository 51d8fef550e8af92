//! Composite short-horizon price forecaster
//!
//! Combines trend strength, momentum and an RSI skew into a drift estimate,
//! projects a seven day price path with support/resistance bands, derives a
//! confidence score from volatility and classifies a trading signal.
//!
//! The coefficients below form a fixed-weight heuristic, not a fitted model.
//! They are not claimed to be statistically optimal; changing any of them
//! changes observable output.

use crate::moving_averages::last_sma;
use crate::oscillators::{macd, rsi, RSI_PERIOD};
use crate::validation::validate_series;
use crate::volatility::{volatility, TRADING_DAYS_PER_YEAR};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Number of projected days
pub const FORECAST_HORIZON_DAYS: usize = 7;
/// Short SMA window
pub const SHORT_SMA_PERIOD: usize = 5;
/// Long SMA window
pub const LONG_SMA_PERIOD: usize = 20;
/// Look-back of the momentum ratio
pub const MOMENTUM_PERIOD: usize = 5;

/// Weight of trend strength in the composite drift
pub const TREND_WEIGHT: f64 = 0.4;
/// Weight of momentum in the composite drift
pub const MOMENTUM_WEIGHT: f64 = 0.4;
/// Drift added when oversold and subtracted when overbought
pub const RSI_ADJUSTMENT: f64 = 0.02;
/// RSI below this is oversold
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this is overbought
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI below this with a rising trend is a buy
pub const BUY_RSI_CEILING: f64 = 35.0;
/// RSI above this with a falling trend is a sell
pub const SELL_RSI_FLOOR: f64 = 65.0;

/// Confidence points lost per volatility percentage point
pub const VOLATILITY_CONFIDENCE_PENALTY: f64 = 1.5;
/// Lower confidence bound
pub const MIN_CONFIDENCE: f64 = 50.0;
/// Upper confidence bound
pub const MAX_CONFIDENCE: f64 = 95.0;
/// Band half-width in multiples of daily volatility
pub const BAND_WIDTH_MULTIPLIER: f64 = 1.5;

/// Most recent value of each indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    /// SMA over the trailing 5 closes
    pub sma5: f64,
    /// SMA over the trailing 20 closes
    pub sma20: f64,
    /// RSI(14), in [0, 100]
    pub rsi: f64,
    /// EMA12 - EMA26
    pub macd: f64,
    /// Annualized volatility in percent
    pub volatility: f64,
    /// `(sma5 - sma20) / sma20`
    pub trend_strength: f64,
    /// 5-period relative price change
    pub momentum: f64,
}

impl IndicatorSnapshot {
    /// Compute every indicator from the full series.
    ///
    /// Short series fall back to the neutral defaults of each indicator.
    pub fn from_prices(prices: &[f64]) -> Self {
        let sma5 = last_sma(prices, SHORT_SMA_PERIOD);
        let sma20 = last_sma(prices, LONG_SMA_PERIOD);

        Self {
            sma5,
            sma20,
            rsi: rsi(prices, RSI_PERIOD),
            macd: macd(prices),
            volatility: volatility(prices),
            trend_strength: trend_strength(sma5, sma20),
            momentum: momentum(prices, MOMENTUM_PERIOD),
        }
    }

    /// True when no indicator overflowed or went NaN
    pub fn is_finite(&self) -> bool {
        [
            self.sma5,
            self.sma20,
            self.rsi,
            self.macd,
            self.volatility,
            self.trend_strength,
            self.momentum,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Relative spread between the short and long SMA, 0 when `sma20 == 0`
pub fn trend_strength(sma5: f64, sma20: f64) -> f64 {
    if sma20 == 0.0 {
        return 0.0;
    }
    (sma5 - sma20) / sma20
}

/// `(price[t] - price[t-period]) / price[t-period]`, 0 without enough history
/// or a zero denominator
pub fn momentum(prices: &[f64], period: usize) -> f64 {
    if prices.len() <= period {
        return 0.0;
    }

    let current = prices[prices.len() - 1];
    let past = prices[prices.len() - 1 - period];
    if past == 0.0 {
        return 0.0;
    }

    (current - past) / past
}

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Day index, 1-based
    pub day: usize,
    /// Projected price
    pub predicted: f64,
    /// Support
    pub low: f64,
    /// Resistance
    pub high: f64,
}

/// Direction of the projected path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Final projected price above the current price
    Bullish,
    /// Final projected price at or below the current price
    Bearish,
}

/// Trading signal type representing buy/sell decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Buy signal
    Buy,
    /// Sell signal
    Sell,
    /// Hold signal
    Hold,
}

/// Complete forecast for one price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Last close of the input series
    pub current_price: f64,
    /// Projected path, one point per day
    pub predictions: Vec<ForecastPoint>,
    /// Percentage change from the current price to the last projected point
    pub predicted_change: f64,
    /// Confidence score in [50, 95]
    pub confidence: f64,
    /// Direction of the projected path
    pub trend: Trend,
    /// Discrete trading signal
    pub signal: Signal,
    /// Indicators the forecast was derived from
    pub indicators: IndicatorSnapshot,
}

impl ForecastResult {
    /// Last projected point
    pub fn final_point(&self) -> Option<&ForecastPoint> {
        self.predictions.last()
    }
}

/// RSI skew: `+0.02` when oversold, `-0.02` when overbought, else 0
pub fn rsi_adjustment(rsi: f64) -> f64 {
    if rsi < RSI_OVERSOLD {
        RSI_ADJUSTMENT
    } else if rsi > RSI_OVERBOUGHT {
        -RSI_ADJUSTMENT
    } else {
        0.0
    }
}

/// Drift over the whole horizon: `0.4 * trend + 0.4 * momentum + rsi skew`
pub fn composite_drift(snapshot: &IndicatorSnapshot) -> f64 {
    TREND_WEIGHT * snapshot.trend_strength
        + MOMENTUM_WEIGHT * snapshot.momentum
        + rsi_adjustment(snapshot.rsi)
}

/// Classify a trading signal; the first matching rule wins
pub fn classify_signal(snapshot: &IndicatorSnapshot) -> Signal {
    if snapshot.rsi < BUY_RSI_CEILING && snapshot.trend_strength > 0.0 {
        Signal::Buy
    } else if snapshot.rsi > SELL_RSI_FLOOR && snapshot.trend_strength < 0.0 {
        Signal::Sell
    } else if snapshot.macd > 0.0 && snapshot.sma5 > snapshot.sma20 {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// `clamp(100 - 1.5 * volatility, 50, 95)`
pub fn confidence_from_volatility(volatility: f64) -> f64 {
    (100.0 - VOLATILITY_CONFIDENCE_PENALTY * volatility).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Project a compounding price path.
///
/// Each day's price is the base of the next, so both the drift and the band
/// width grow multiplicatively.
pub fn project_path(
    current_price: f64,
    drift: f64,
    volatility: f64,
    days: usize,
) -> Vec<ForecastPoint> {
    let daily_drift = drift / days as f64;
    let daily_vol = volatility / 100.0 / TRADING_DAYS_PER_YEAR.sqrt();

    let mut price = current_price;
    (1..=days)
        .map(|day| {
            price *= 1.0 + daily_drift;
            let half_width = price * daily_vol * BAND_WIDTH_MULTIPLIER;
            ForecastPoint {
                day,
                predicted: price,
                low: price - half_width,
                high: price + half_width,
            }
        })
        .collect()
}

/// Forecast the next seven days of a price series.
///
/// Fails with `InsufficientData` when the series has fewer than 50 closes or
/// contains a non-finite or non-positive price. Closes whose magnitudes
/// overflow an indicator or the projected path are rejected the same way.
/// No partial result is ever returned.
pub fn forecast(prices: &[f64]) -> Result<ForecastResult> {
    let prices = validate_series(prices)?;
    // Validation guarantees a non-empty, positive series
    let current_price = prices[prices.len() - 1];

    let indicators = IndicatorSnapshot::from_prices(prices);
    if !indicators.is_finite() {
        return Err(MathError::InsufficientData(
            "Price magnitudes overflow the indicator calculations".to_string(),
        ));
    }

    let drift = composite_drift(&indicators);
    let predictions = project_path(
        current_price,
        drift,
        indicators.volatility,
        FORECAST_HORIZON_DAYS,
    );

    let final_price = predictions
        .last()
        .map(|point| point.predicted)
        .unwrap_or(current_price);
    let predicted_change = (final_price - current_price) / current_price * 100.0;

    let path_is_finite = predictions
        .iter()
        .all(|p| p.predicted.is_finite() && p.low.is_finite() && p.high.is_finite());
    if !path_is_finite || !predicted_change.is_finite() {
        return Err(MathError::InsufficientData(
            "Projected path overflows for this price series".to_string(),
        ));
    }

    let trend = if predicted_change > 0.0 {
        Trend::Bullish
    } else {
        Trend::Bearish
    };

    Ok(ForecastResult {
        current_price,
        predictions,
        predicted_change,
        confidence: confidence_from_volatility(indicators.volatility),
        trend,
        signal: classify_signal(&indicators),
        indicators,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;

    fn snapshot(
        rsi: f64,
        trend_strength: f64,
        macd: f64,
        sma5: f64,
        sma20: f64,
    ) -> IndicatorSnapshot {
        IndicatorSnapshot {
            sma5,
            sma20,
            rsi,
            macd,
            volatility: 20.0,
            trend_strength,
            momentum: 0.0,
        }
    }

    #[test]
    fn test_rsi_adjustment() {
        assert_eq!(rsi_adjustment(29.9), 0.02);
        assert_eq!(rsi_adjustment(30.0), 0.0);
        assert_eq!(rsi_adjustment(70.0), 0.0);
        assert_eq!(rsi_adjustment(70.1), -0.02);
    }

    #[test]
    fn test_composite_drift_weights() {
        let mut snap = snapshot(50.0, 0.05, 0.0, 0.0, 0.0);
        snap.momentum = 0.1;
        assert!((composite_drift(&snap) - (0.02 + 0.04)).abs() < 1e-12);

        snap.rsi = 20.0;
        assert!((composite_drift(&snap) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_signal_rule_order() {
        // Oversold in an uptrend
        assert_eq!(classify_signal(&snapshot(30.0, 0.01, -1.0, 99.0, 100.0)), Signal::Buy);
        // Overbought in a downtrend
        assert_eq!(classify_signal(&snapshot(70.0, -0.01, 1.0, 101.0, 100.0)), Signal::Sell);
        // MACD and SMA agree
        assert_eq!(classify_signal(&snapshot(50.0, 0.0, 0.5, 101.0, 100.0)), Signal::Buy);
        // Positive MACD alone is not enough
        assert_eq!(classify_signal(&snapshot(50.0, 0.0, 0.5, 99.0, 100.0)), Signal::Hold);
        // RSI thresholds are strict
        assert_eq!(classify_signal(&snapshot(35.0, 0.01, -1.0, 99.0, 100.0)), Signal::Hold);
        assert_eq!(classify_signal(&snapshot(65.0, -0.01, -1.0, 99.0, 100.0)), Signal::Hold);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(confidence_from_volatility(0.0), 95.0);
        assert_eq!(confidence_from_volatility(10.0), 85.0);
        assert_eq!(confidence_from_volatility(40.0), 50.0);
        assert_eq!(confidence_from_volatility(1000.0), 50.0);
    }

    #[test]
    fn test_project_path_compounds() {
        let path = project_path(100.0, 0.07, 0.0, 7);
        assert_eq!(path.len(), 7);

        let expected = 100.0 * 1.01f64.powi(7);
        assert!((path[6].predicted - expected).abs() < 1e-9);
        assert_eq!(path[0].day, 1);
        assert_eq!(path[6].day, 7);
        // Zero volatility collapses the band
        assert_eq!(path[3].low, path[3].predicted);
        assert_eq!(path[3].high, path[3].predicted);
    }

    #[test]
    fn test_project_path_band_width() {
        let vol = 252f64.sqrt() * 100.0 * 0.01; // 1% daily
        let path = project_path(100.0, 0.0, vol, 7);
        for point in &path {
            assert!((point.predicted - 100.0).abs() < 1e-12);
            assert!((point.high - point.low - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trend_strength_and_momentum_defaults() {
        assert_eq!(trend_strength(10.0, 0.0), 0.0);
        assert_eq!(momentum(&[1.0, 2.0, 3.0], 5), 0.0);
        assert_eq!(momentum(&[0.0, 1.0, 1.0, 1.0, 1.0, 2.0], 5), 0.0);
        assert!((momentum(&[100.0, 1.0, 1.0, 1.0, 1.0, 110.0], 5) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_finiteness() {
        let mut snap = snapshot(50.0, 0.01, 0.1, 101.0, 100.0);
        assert!(snap.is_finite());

        snap.trend_strength = f64::NAN;
        assert!(!snap.is_finite());

        snap.trend_strength = 0.0;
        snap.volatility = f64::INFINITY;
        assert!(!snap.is_finite());
    }

    #[test]
    fn test_forecast_requires_history() {
        let prices = vec![100.0; 49];
        assert!(matches!(forecast(&prices), Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_forecast_flat_series() {
        let prices = vec![100.0; 60];
        let result = forecast(&prices).unwrap();

        // Flat history: no losses so RSI is 100, which drags the drift down
        assert_eq!(result.indicators.rsi, 100.0);
        assert_eq!(result.indicators.volatility, 0.0);
        assert_eq!(result.confidence, 95.0);
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.trend, Trend::Bearish);
        assert!(result.predicted_change < 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = forecast(&prices).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["signal"], "BUY");
        assert_eq!(json["trend"], "bullish");
        assert!(json["predictedChange"].is_number());
        assert!(json["indicators"]["trendStrength"].is_number());
        assert_eq!(json["predictions"].as_array().unwrap().len(), 7);
    }
}

//! Forecast service: provider lookup, caching and the engine in one call

use crate::cache::{CacheKey, ForecastCache};
use crate::config::DeskConfig;
use crate::data::PriceHistoryProvider;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use forecast_math::{forecast, ForecastResult};
use tracing::{debug, info, warn};

/// Serves forecasts for symbols, memoizing results per series.
///
/// All state (the cache) lives here; the engine itself stays a pure function
/// of the price series.
#[derive(Debug)]
pub struct ForecastDesk<P> {
    provider: P,
    cache: ForecastCache,
}

impl<P: PriceHistoryProvider> ForecastDesk<P> {
    /// Create a desk around a history provider
    pub fn new(provider: P, config: &DeskConfig) -> Self {
        // Largest span chrono accepts in seconds
        let ttl_secs = i64::try_from(config.cache.ttl_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        let ttl = Duration::seconds(ttl_secs);
        Self {
            provider,
            cache: ForecastCache::new(ttl, config.cache.capacity),
        }
    }

    /// Forecast `symbol` at the current wall-clock time
    pub fn forecast(&mut self, symbol: &str) -> Result<ForecastResult> {
        self.forecast_at(symbol, Utc::now())
    }

    /// Forecast `symbol` as of `now`.
    ///
    /// Engine failures are returned to the caller and never cached.
    pub fn forecast_at(&mut self, symbol: &str, now: DateTime<Utc>) -> Result<ForecastResult> {
        let prices = self.provider.price_history(symbol)?;
        let key = CacheKey::new(symbol, &prices);

        if let Some(result) = self.cache.get(&key, now) {
            debug!(symbol, fingerprint = %key.fingerprint, "forecast cache hit");
            return Ok(result);
        }
        debug!(symbol, closes = prices.len(), "forecast cache miss");

        let result = forecast(&prices).map_err(|err| {
            warn!(symbol, closes = prices.len(), error = %err, "series rejected");
            err
        })?;

        info!(
            symbol,
            signal = ?result.signal,
            trend = ?result.trend,
            change = result.predicted_change,
            confidence = result.confidence,
            "forecast computed"
        );

        self.cache.insert(key, result.clone(), now);
        Ok(result)
    }

    /// Forecasts memoized so far
    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Mutable cache access, e.g. to clear or purge it
    pub fn cache_mut(&mut self) -> &mut ForecastCache {
        &mut self.cache
    }

    /// The history provider this desk reads from
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

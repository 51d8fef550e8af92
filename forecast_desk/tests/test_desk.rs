use chrono::{DateTime, Duration, TimeZone, Utc};
use forecast_desk::{
    DeskConfig, DeskError, ForecastDesk, InMemoryPriceHistory, PriceHistoryProvider,
    SyntheticPriceHistory,
};
use forecast_math::{forecast, MathError};
use pretty_assertions::assert_eq;
use std::cell::Cell;

fn rising(len: usize) -> Vec<f64> {
    (0..len).map(|i| 100.0 + i as f64 * 0.8).collect()
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap()
}

/// Provider that counts lookups and can swap its series between calls
struct CountingProvider {
    closes: Vec<f64>,
    calls: Cell<usize>,
}

impl PriceHistoryProvider for CountingProvider {
    fn price_history(&self, _symbol: &str) -> forecast_desk::Result<Vec<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.closes.clone())
    }
}

#[test]
fn test_desk_matches_engine() {
    let closes = rising(60);
    let provider = InMemoryPriceHistory::new().with_series("AAPL", closes.clone());
    let mut desk = ForecastDesk::new(provider, &DeskConfig::default());

    let result = desk.forecast_at("AAPL", t0()).unwrap();
    assert_eq!(result, forecast(&closes).unwrap());
    assert_eq!(desk.cache().len(), 1);
}

#[test]
fn test_cached_result_reused_within_ttl() {
    let provider = CountingProvider {
        closes: rising(60),
        calls: Cell::new(0),
    };
    let mut desk = ForecastDesk::new(provider, &DeskConfig::default());

    // Plant a result the engine would never produce for this series
    let sentinel = forecast(&rising(80)).unwrap();
    let key = forecast_desk::CacheKey::new("AAPL", &rising(60));
    desk.cache_mut().insert(key, sentinel.clone(), t0());

    let served = desk.forecast_at("AAPL", t0() + Duration::seconds(10)).unwrap();

    assert_eq!(served, sentinel);
    assert_ne!(served, forecast(&rising(60)).unwrap());
    assert_eq!(desk.provider().calls.get(), 1);
    assert_eq!(desk.cache().len(), 1);
}

#[test]
fn test_expired_entry_recomputed() {
    let config = DeskConfig::from_toml_str("[cache]\nttl_secs = 5\n").unwrap();
    let provider = InMemoryPriceHistory::new().with_series("AAPL", rising(60));
    let mut desk = ForecastDesk::new(provider, &config);

    desk.forecast_at("AAPL", t0()).unwrap();
    let later = t0() + Duration::seconds(6);
    let key = forecast_desk::CacheKey::new("AAPL", &rising(60));
    assert!(desk.cache_mut().get(&key, later).is_none());

    desk.forecast_at("AAPL", later).unwrap();
    assert_eq!(desk.cache().len(), 1);
}

#[test]
fn test_insufficient_history_not_cached() {
    let provider = InMemoryPriceHistory::new().with_series("NEW", rising(49));
    let mut desk = ForecastDesk::new(provider, &DeskConfig::default());

    let err = desk.forecast_at("NEW", t0()).unwrap_err();
    assert!(matches!(err, DeskError::Math(MathError::InsufficientData(_))));
    assert!(desk.cache().is_empty());
}

#[test]
fn test_unknown_symbol() {
    let mut desk = ForecastDesk::new(InMemoryPriceHistory::new(), &DeskConfig::default());
    let err = desk.forecast_at("NOPE", t0()).unwrap_err();
    assert!(matches!(err, DeskError::UnknownSymbol(ref s) if s == "NOPE"));
}

#[test]
fn test_synthetic_symbols_forecast_independently() {
    let config = DeskConfig::default();
    let provider = SyntheticPriceHistory::new(config.synthetic.clone()).unwrap();
    let mut desk = ForecastDesk::new(provider, &config);

    let a = desk.forecast_at("AAPL", t0()).unwrap();
    let b = desk.forecast_at("MSFT", t0()).unwrap();

    assert_eq!(a.predictions.len(), 7);
    assert_eq!(b.predictions.len(), 7);
    assert_ne!(a.current_price, b.current_price);
    assert_eq!(desk.cache().len(), 2);
}

//! Forecast memoization keyed by symbol and series fingerprint.
//!
//! The engine is referentially transparent, so a forecast can be reused for
//! as long as the series it was computed from is unchanged. The fingerprint
//! catches a changed series; the TTL bounds how long a symbol's entry is
//! trusted at all.

use chrono::{DateTime, Duration, Utc};
use forecast_math::ForecastResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Content hash of a price series (blake3, hex-rendered)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesFingerprint(String);

impl SeriesFingerprint {
    /// Hash the little-endian bytes of every close, in order
    pub fn of(prices: &[f64]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for price in prices {
            hasher.update(&price.to_le_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a cached forecast
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Requested symbol
    pub symbol: String,
    /// Fingerprint of the series the forecast was computed from
    pub fingerprint: SeriesFingerprint,
}

impl CacheKey {
    /// Key for `symbol` with the fingerprint of `prices`
    pub fn new(symbol: impl Into<String>, prices: &[f64]) -> Self {
        Self {
            symbol: symbol.into(),
            fingerprint: SeriesFingerprint::of(prices),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: ForecastResult,
    stored_at: DateTime<Utc>,
}

/// In-memory forecast cache with a time-to-live and a capacity bound.
///
/// The current time is always passed in, so expiry can be exercised without
/// waiting on a clock.
#[derive(Debug, Clone)]
pub struct ForecastCache {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ForecastCache {
    /// Create a cache; a zero capacity is raised to one
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ttl,
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Fresh entry for `key`, dropping it if it has expired
    pub fn get(&mut self, key: &CacheKey, now: DateTime<Utc>) -> Option<ForecastResult> {
        let expired = match self.entries.get(key) {
            Some(entry) if !self.is_expired(entry, now) => return Some(entry.result.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            debug!(symbol = %key.symbol, "cached forecast expired");
        }
        None
    }

    /// Store a forecast, evicting the oldest entry when full
    pub fn insert(&mut self, key: CacheKey, result: ForecastResult, now: DateTime<Utc>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired(now);
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        self.entries.insert(
            key,
            CacheEntry {
                result,
                stored_at: now,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.stored_at < ttl);
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!(removed, "purged expired forecasts");
        }
        removed
    }

    /// Number of stored forecasts, expired ones included until purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Time-to-live of each entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.stored_at >= self.ttl
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            trace!(symbol = %key.symbol, "evicting oldest cached forecast");
            self.entries.remove(&key);
        }
    }
}

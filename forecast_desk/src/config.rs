//! Desk configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [cache]
//! ttl_secs = 30
//! capacity = 256
//!
//! [synthetic]
//! seed = 42
//! length = 90
//! start_price = 100.0
//! daily_drift = 0.0005
//! daily_volatility = 0.015
//! ```

use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Forecast cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a cached forecast stays fresh
    pub ttl_secs: u64,
    /// Maximum number of cached forecasts
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 30,
            capacity: 256,
        }
    }
}

/// Parameters of the synthetic random-walk history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Base seed, combined with the symbol
    pub seed: u64,
    /// Number of closes generated per symbol
    pub length: usize,
    /// First close
    pub start_price: f64,
    /// Mean daily return
    pub daily_drift: f64,
    /// Standard deviation of daily returns
    pub daily_volatility: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            length: 90,
            start_price: 100.0,
            daily_drift: 0.0005,
            daily_volatility: 0.015,
        }
    }
}

/// Top-level desk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub cache: CacheConfig,
    pub synthetic: SyntheticConfig,
}

impl DeskConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DeskConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(DeskError::Config(
                "cache.capacity must be greater than zero".to_string(),
            ));
        }

        let synthetic = &self.synthetic;
        if synthetic.length == 0 {
            return Err(DeskError::Config(
                "synthetic.length must be greater than zero".to_string(),
            ));
        }
        if !synthetic.start_price.is_finite() || synthetic.start_price <= 0.0 {
            return Err(DeskError::Config(
                "synthetic.start_price must be a positive number".to_string(),
            ));
        }
        if !synthetic.daily_volatility.is_finite() || synthetic.daily_volatility < 0.0 {
            return Err(DeskError::Config(
                "synthetic.daily_volatility must be non-negative".to_string(),
            ));
        }
        if !synthetic.daily_drift.is_finite() {
            return Err(DeskError::Config(
                "synthetic.daily_drift must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

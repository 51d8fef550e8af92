//! # Forecast Desk
//!
//! The collaborator layer around [`forecast_math`]: it resolves symbols to
//! price histories, memoizes forecasts per symbol and series fingerprint,
//! and loads its settings from TOML.
//!
//! ## Features
//!
//! - History providers: in-memory, deterministic synthetic random walk, CSV files
//! - Forecast cache with a TTL and a capacity bound
//! - TOML configuration with defaults for every field
//! - Structured logging through `tracing`
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_desk::{DeskConfig, ForecastDesk, SyntheticPriceHistory};
//!
//! let config = DeskConfig::default();
//! let provider = SyntheticPriceHistory::new(config.synthetic.clone())?;
//! let mut desk = ForecastDesk::new(provider, &config);
//!
//! let result = desk.forecast("AAPL")?;
//! assert_eq!(result.predictions.len(), 7);
//! assert_eq!(desk.cache().len(), 1);
//! # Ok::<(), forecast_desk::DeskError>(())
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod desk;
pub mod error;

// Re-export commonly used types
pub use crate::cache::{CacheKey, ForecastCache, SeriesFingerprint};
pub use crate::config::{CacheConfig, DeskConfig, SyntheticConfig};
pub use crate::data::{
    DataLoader, InMemoryPriceHistory, PriceHistoryProvider, SyntheticPriceHistory,
};
pub use crate::desk::ForecastDesk;
pub use crate::error::{DeskError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

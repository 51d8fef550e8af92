use anyhow::{Context, Result};
use clap::Parser;
use forecast_desk::{
    DataLoader, DeskConfig, ForecastDesk, InMemoryPriceHistory, SyntheticPriceHistory,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Forecast the next seven days of a price history
#[derive(Debug, Parser)]
#[command(name = "forecast_desk", version)]
struct Args {
    /// CSV file with a `close` (or `price`) column
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Symbol to forecast; without --csv a synthetic history is used
    #[arg(long, default_value = "DEMO")]
    symbol: String,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DeskConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeskConfig::default(),
    };

    let result = match &args.csv {
        Some(path) => {
            let closes = DataLoader::from_csv(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let provider = InMemoryPriceHistory::new().with_series(args.symbol.clone(), closes);
            ForecastDesk::new(provider, &config).forecast(&args.symbol)?
        }
        None => {
            let provider = SyntheticPriceHistory::new(config.synthetic.clone())?;
            ForecastDesk::new(provider, &config).forecast(&args.symbol)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

//! Depth and slippage report for a saved order book response.
//!
//! Usage:
//!   freya-depth --quotes snapshot.json [--config analysis.json] [--side buy] [--sizes 1,2,3] [--csv]

use std::{fs, path::PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use freya_depth::{
    depth_snapshot,
    report::{depth_csv, slippage_report, spread_summary},
    run_scenarios, AnalysisConfig, BatchPolicy, Instrument, OrderBook, QuoteResponse, Side,
};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Parser)]
#[command(name = "freya-depth")]
#[command(about = "Order book depth and market order slippage report")]
struct Cli {
    /// Saved order book response (JSON)
    #[arg(short, long)]
    quotes: PathBuf,

    /// Analysis configuration (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instrument pair, e.g. usd_mxn
    #[arg(long)]
    book: Option<Instrument>,

    /// Trade direction: buy or sell
    #[arg(long)]
    side: Option<Side>,

    /// Depth band around the top of book, as a fraction (0.05 = 5%)
    #[arg(long)]
    pct: Option<Decimal>,

    /// Multiplier applied to each raw size
    #[arg(long)]
    multiplier: Option<Decimal>,

    /// Comma separated raw sizes
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<Decimal>>,

    /// Keep going when a size exceeds the visible depth
    #[arg(long)]
    skip_failed: bool,

    /// Print the bounded ladders as CSV
    #[arg(long)]
    csv: bool,
}

impl Cli {
    fn load_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                AnalysisConfig::from_json(&body).with_context(|| format!("parsing {}", path.display()))?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(book) = &self.book {
            config.book = book.clone();
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(pct) = self.pct {
            config.depth_band_pct = pct;
        }
        if let Some(multiplier) = self.multiplier {
            config.multiplier = multiplier;
        }
        if let Some(sizes) = &self.sizes {
            config.sizes = sizes.clone();
        }
        if self.skip_failed {
            config.policy = BatchPolicy::Skip;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("freya_depth=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    info!(book = %config.book, side = %config.side, "loaded configuration");

    let body = fs::read_to_string(&cli.quotes).with_context(|| format!("reading {}", cli.quotes.display()))?;
    let payload = QuoteResponse::from_json(&body)?.into_payload()?;
    let book = OrderBook::from_payload(&payload).context("building order book")?;
    info!(bids = book.bids().len(), asks = book.asks().len(), "order book ready");

    let snapshot = depth_snapshot(&book, config.depth_band_pct)?;
    println!("{}", spread_summary(&snapshot, &config.book));
    if cli.csv {
        print!("{}", depth_csv(&snapshot));
    }

    let table = run_scenarios(&book, config.side, config.multiplier, &config.sizes, config.policy)?;
    for line in slippage_report(&table, &config.book) {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["freya-depth", "--quotes", "snapshot.json"].iter().chain(args).copied())
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = cli(&[]).load_config().unwrap();
        assert_eq!(config.book, Instrument::default());
        assert_eq!(config.side, Side::Sell);
        assert_eq!(config.depth_band_pct, dec!(0.05));
        assert_eq!(config.policy, BatchPolicy::Abort);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = cli(&[
            "--book", "btc_mxn", "--side", "buy", "--pct", "0.1", "--multiplier", "1000", "--sizes", "1,2.5", "--skip-failed",
        ]);
        assert_eq!(cli.quotes, PathBuf::from("snapshot.json"));
        let config = cli.load_config().unwrap();
        assert_eq!(config.book.to_string(), "btc_mxn");
        assert_eq!(config.side, Side::Buy);
        assert_eq!(config.depth_band_pct, dec!(0.1));
        assert_eq!(config.multiplier, dec!(1000));
        assert_eq!(config.sizes, vec![dec!(1), dec!(2.5)]);
        assert_eq!(config.policy, BatchPolicy::Skip);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(cli(&["--pct", "0"]).load_config().is_err());
        assert!(cli(&["--multiplier", "0"]).load_config().is_err());
        assert!(cli(&["--config", "/nonexistent/analysis.json"]).load_config().is_err());
        assert!(Cli::try_parse_from(["freya-depth", "--quotes", "snapshot.json", "--side", "hold"]).is_err());
        assert!(Cli::try_parse_from(["freya-depth"]).is_err());
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BookError, BookResult},
    instrument::Instrument,
    quote::QuoteRequest,
    scenario::BatchPolicy,
    side::Side,
};

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub book: Instrument,
    /// Request aggregated levels from the quote endpoint
    pub aggregate: bool,
    /// Half-width of the depth band as a fraction of the top of book
    pub depth_band_pct: Decimal,
    /// Scales each raw size into major-currency units
    pub multiplier: Decimal,
    pub sizes: Vec<Decimal>,
    pub side: Side,
    pub policy: BatchPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            book: Instrument::default(),
            aggregate: false,
            depth_band_pct: Decimal::new(5, 2),
            multiplier: Decimal::from(100_000),
            sizes: (1..=5).map(Decimal::from).collect(),
            side: Side::Sell,
            policy: BatchPolicy::Abort,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(body: &str) -> BookResult<Self> {
        let config: Self = serde_json::from_str(body)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BookResult<()> {
        if self.depth_band_pct <= Decimal::ZERO {
            return Err(BookError::InvalidBand(self.depth_band_pct));
        }
        if self.multiplier <= Decimal::ZERO {
            return Err(BookError::InvalidConfig(format!("multiplier must be positive, got {}", self.multiplier)));
        }
        if self.sizes.is_empty() {
            return Err(BookError::InvalidConfig("no order sizes given".to_owned()));
        }
        Ok(())
    }

    #[must_use]
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest::new(self.book.to_string(), self.aggregate)
    }
}

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    error::{BookError, BookResult},
    level::PriceLevel,
    quote::{QuotePayload, RawQuote, RawValue},
    side::BookSide,
};

/// An immutable two-sided ladder.
///
/// - `bids`: price-descending, best bid first.
/// - `asks`: price-ascending, best ask first.
///
/// This ordering is established once at construction and every consumer relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl OrderBook {
    /// Validate, tag and sort raw quotes into a canonical ladder.
    pub fn from_quotes(bids: &[RawQuote], asks: &[RawQuote]) -> BookResult<Self> {
        let mut bids = parse_side(bids, BookSide::Bid)?;
        let mut asks = parse_side(asks, BookSide::Ask)?;

        // Stable sorts keep arrival order among equal prices
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));

        debug!(bids = bids.len(), asks = asks.len(), "built order book");
        Ok(Self { bids, asks })
    }

    pub fn from_payload(payload: &QuotePayload) -> BookResult<Self> {
        Self::from_quotes(&payload.bids, &payload.asks)
    }

    #[inline]
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    #[inline]
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    #[inline]
    #[must_use]
    pub fn levels(&self, side: BookSide) -> &[PriceLevel] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    #[inline]
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    #[inline]
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// All levels in canonical order, bids first.
    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> {
        self.bids.iter().chain(self.asks.iter())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Visible liquidity on one side, in the major currency. `None` if the total overflows.
    #[must_use]
    pub fn total_amount(&self, side: BookSide) -> Option<Decimal> {
        self.levels(side).iter().try_fold(Decimal::ZERO, |total, level| total.checked_add(level.amount))
    }
}

fn parse_side(quotes: &[RawQuote], side: BookSide) -> BookResult<Vec<PriceLevel>> {
    quotes
        .iter()
        .enumerate()
        .map(|(index, quote)| {
            let price = parse_field(quote.price.as_ref(), side, index, "price")?;
            let amount = parse_field(quote.amount.as_ref(), side, index, "amount")?;
            let level = PriceLevel::new(price, amount, side);
            if !level.is_valid() {
                let (field, value) = if price <= Decimal::ZERO { ("price", price) } else { ("amount", amount) };
                return Err(BookError::MalformedQuote {
                    side,
                    index,
                    field,
                    reason: format!("is out of range ({value})"),
                });
            }
            Ok(level)
        })
        .collect()
}

#[inline]
fn parse_field(value: Option<&RawValue>, side: BookSide, index: usize, field: &'static str) -> BookResult<Decimal> {
    value
        .ok_or_else(|| "is missing".to_owned())
        .and_then(RawValue::to_decimal)
        .map_err(|reason| BookError::MalformedQuote { side, index, field, reason })
}

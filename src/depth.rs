use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{
    book::OrderBook,
    error::{BookError, BookResult},
    level::PriceLevel,
    side::BookSide,
};

/// A ladder entry annotated with running depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthPoint {
    pub price: Decimal,
    /// Quantity at this level in the major currency
    pub amount: Decimal,
    /// Sum of `amount` from the top of book down to and including this level
    pub cumulative_amount: Decimal,
    /// Quantity at this level in the minor currency
    pub notional: Decimal,
    pub cumulative_notional: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepthSnapshot {
    pub top_bid: Decimal,
    pub top_ask: Decimal,
    /// Mid price between best bid and ask
    pub midpoint: Decimal,
    /// Absolute spread (ask - bid)
    pub spread: Decimal,
    /// Spread as percentage of mid price
    pub spread_pct: Decimal,
    /// Half-width of the band as a percentage of the top of book
    pub band_pct: Decimal,
    /// Lowest bid price kept in the band
    pub bid_lower: Decimal,
    /// Highest ask price kept in the band
    pub ask_upper: Decimal,
    /// Bids within the band, best first
    pub bounded_bids: Vec<DepthPoint>,
    /// Asks within the band, best first
    pub bounded_asks: Vec<DepthPoint>,
    pub full_bids: Vec<DepthPoint>,
    pub full_asks: Vec<DepthPoint>,
}

impl DepthSnapshot {
    /// Spread in basis points.
    #[inline]
    #[must_use]
    pub fn spread_bps(&self) -> Decimal {
        self.spread_pct * Decimal::ONE_HUNDRED
    }

    #[must_use]
    pub fn bounded(&self, side: BookSide) -> &[DepthPoint] {
        match side {
            BookSide::Bid => &self.bounded_bids,
            BookSide::Ask => &self.bounded_asks,
        }
    }

    #[must_use]
    pub fn full(&self, side: BookSide) -> &[DepthPoint] {
        match side {
            BookSide::Bid => &self.full_bids,
            BookSide::Ask => &self.full_asks,
        }
    }
}

/// Compute top of book, spread and cumulative depth within `top * (1 ± pct)`.
pub fn depth_snapshot(book: &OrderBook, pct: Decimal) -> BookResult<DepthSnapshot> {
    if pct <= Decimal::ZERO {
        return Err(BookError::InvalidBand(pct));
    }

    let top_bid = book.best_bid().ok_or(BookError::EmptySide(BookSide::Bid))?.price;
    let top_ask = book.best_ask().ok_or(BookError::EmptySide(BookSide::Ask))?.price;
    if top_ask <= top_bid {
        return Err(BookError::CrossedBook { bid: top_bid, ask: top_ask });
    }

    // top_ask > top_bid > 0, so the spread is positive and at most 2x the midpoint
    let midpoint = top_ask.checked_add(top_bid).ok_or(BookError::Overflow("midpoint"))? / Decimal::TWO;
    let spread = top_ask - top_bid;
    let spread_pct = spread / midpoint * Decimal::ONE_HUNDRED;

    let band_pct = pct.checked_mul(Decimal::ONE_HUNDRED).ok_or(BookError::Overflow("band"))?;
    let bid_lower = (Decimal::ONE - pct).checked_mul(top_bid).ok_or(BookError::Overflow("bid band"))?;
    let ask_upper = Decimal::ONE
        .checked_add(pct)
        .and_then(|factor| factor.checked_mul(top_ask))
        .ok_or(BookError::Overflow("ask band"))?;
    debug!(%top_bid, %top_ask, %spread_pct, %bid_lower, %ask_upper, "computed depth band");

    Ok(DepthSnapshot {
        top_bid,
        top_ask,
        midpoint,
        spread,
        spread_pct,
        band_pct,
        bid_lower,
        ask_upper,
        bounded_bids: cumulative(book.bids().iter().filter(|level| level.price >= bid_lower))?,
        bounded_asks: cumulative(book.asks().iter().filter(|level| level.price <= ask_upper))?,
        full_bids: cumulative(book.bids())?,
        full_asks: cumulative(book.asks())?,
    })
}

/// Running totals in ladder order.
pub fn cumulative<'a>(levels: impl IntoIterator<Item = &'a PriceLevel>) -> BookResult<Vec<DepthPoint>> {
    let mut amount_total = Decimal::ZERO;
    let mut notional_total = Decimal::ZERO;
    levels
        .into_iter()
        .map(|level| {
            let notional = level.notional().ok_or(BookError::Overflow("notional"))?;
            amount_total = amount_total.checked_add(level.amount).ok_or(BookError::Overflow("cumulative amount"))?;
            notional_total =
                notional_total.checked_add(notional).ok_or(BookError::Overflow("cumulative notional"))?;
            Ok(DepthPoint {
                price: level.price,
                amount: level.amount,
                cumulative_amount: amount_total,
                notional,
                cumulative_notional: notional_total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::quote::RawQuote;

    fn book(bids: &[(&str, &str)], asks: &[(&str, &str)]) -> OrderBook {
        let raw = |levels: &[(&str, &str)]| -> Vec<RawQuote> {
            levels.iter().map(|&(price, amount)| RawQuote::new(price, amount)).collect()
        };
        OrderBook::from_quotes(&raw(bids), &raw(asks)).unwrap()
    }

    fn sample() -> OrderBook {
        book(
            &[("19.40", "100"), ("19.00", "200"), ("18.00", "300"), ("17.00", "1000")],
            &[("19.60", "150"), ("20.00", "250"), ("20.50", "350"), ("22.00", "900")],
        )
    }

    #[test]
    fn test_spread_percentage() {
        let snapshot = depth_snapshot(&sample(), dec!(0.05)).unwrap();
        assert_eq!(snapshot.top_bid, dec!(19.40));
        assert_eq!(snapshot.top_ask, dec!(19.60));
        assert_eq!(snapshot.midpoint, dec!(19.50));
        assert_eq!(snapshot.spread, dec!(0.20));
        assert_eq!(snapshot.spread_pct.round_dp(4), dec!(1.0256));
        assert_eq!(snapshot.spread_bps().round_dp(2), dec!(102.56));
        assert_eq!(snapshot.band_pct, dec!(5));
    }

    #[test]
    fn test_band_filtering() {
        let snapshot = depth_snapshot(&sample(), dec!(0.05)).unwrap();
        // 19.40 * 0.95 = 18.43, 19.60 * 1.05 = 20.58
        assert_eq!(snapshot.bid_lower, dec!(18.43));
        assert_eq!(snapshot.ask_upper, dec!(20.58));

        let bid_prices: Vec<_> = snapshot.bounded_bids.iter().map(|p| p.price).collect();
        let ask_prices: Vec<_> = snapshot.bounded_asks.iter().map(|p| p.price).collect();
        assert_eq!(bid_prices, vec![dec!(19.40), dec!(19.00)]);
        assert_eq!(ask_prices, vec![dec!(19.60), dec!(20.00), dec!(20.50)]);

        assert_eq!(snapshot.full(BookSide::Bid).len(), 4);
        assert_eq!(snapshot.bounded(BookSide::Ask).len(), 3);
    }

    #[test]
    fn test_band_boundary_is_inclusive() {
        let snapshot = depth_snapshot(&book(&[("100", "1"), ("90", "1")], &[("110", "1"), ("121", "1")]), dec!(0.1)).unwrap();
        assert_eq!(snapshot.bounded_bids.len(), 2);
        assert_eq!(snapshot.bounded_asks.len(), 2);
    }

    #[test]
    fn test_cumulative_depth() {
        let snapshot = depth_snapshot(&sample(), dec!(0.05)).unwrap();
        for ladder in [&snapshot.bounded_bids, &snapshot.bounded_asks, &snapshot.full_bids, &snapshot.full_asks] {
            assert!(ladder.windows(2).all(|w| w[0].cumulative_amount <= w[1].cumulative_amount));
            let total: Decimal = ladder.iter().map(|p| p.amount).sum();
            assert_eq!(ladder.last().map(|p| p.cumulative_amount), Some(total));
        }
        assert_eq!(snapshot.bounded_asks.last().unwrap().cumulative_amount, dec!(750));
        assert_eq!(snapshot.full_asks.last().unwrap().cumulative_amount, dec!(1650));

        // 100 * 19.40 + 200 * 19.00
        assert_eq!(snapshot.bounded_bids[1].notional, dec!(3800));
        assert_eq!(snapshot.bounded_bids[1].cumulative_notional, dec!(5740));
    }

    #[test]
    fn test_empty_sides() {
        let err = depth_snapshot(&book(&[], &[("19.60", "1")]), dec!(0.05)).unwrap_err();
        assert!(matches!(err, BookError::EmptySide(BookSide::Bid)));

        let err = depth_snapshot(&book(&[("19.40", "1")], &[]), dec!(0.05)).unwrap_err();
        assert!(matches!(err, BookError::EmptySide(BookSide::Ask)));
    }

    #[test]
    fn test_crossed_book() {
        let err = depth_snapshot(&book(&[("19.60", "1")], &[("19.40", "1")]), dec!(0.05)).unwrap_err();
        assert!(matches!(err, BookError::CrossedBook { bid, ask } if bid == dec!(19.60) && ask == dec!(19.40)));

        let err = depth_snapshot(&book(&[("19.50", "1")], &[("19.50", "1")]), dec!(0.05)).unwrap_err();
        assert!(matches!(err, BookError::CrossedBook { .. }));
    }

    #[test]
    fn test_overflowing_notional_is_an_error() {
        let huge = book(&[("1e15", "1e15")], &[("2e15", "1")]);
        let err = depth_snapshot(&huge, dec!(0.05)).unwrap_err();
        assert!(matches!(err, BookError::Overflow("notional")));
        assert!(!err.is_recoverable());

        let wide = book(&[("1", "1")], &[("2", "1"), ("3", "1")]);
        assert!(matches!(depth_snapshot(&wide, Decimal::MAX), Err(BookError::Overflow(_))));

        let deep = book(&[("1", "1")], &[("2", Decimal::MAX.to_string().as_str()), ("2.5", "1")]);
        assert!(matches!(cumulative(deep.asks()), Err(BookError::Overflow(_))));
    }

    #[test]
    fn test_invalid_band() {
        assert!(matches!(depth_snapshot(&sample(), Decimal::ZERO), Err(BookError::InvalidBand(_))));
        assert!(matches!(depth_snapshot(&sample(), dec!(-0.1)), Err(BookError::InvalidBand(_))));
    }
}

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    book::OrderBook,
    error::{BookError, BookResult},
    side::Side,
};

/// Outcome of walking the book with a market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub requested_size: Decimal,
    pub side: Side,
    pub average_price: Decimal,
    /// `|average_price - top_price| / top_price * 100`
    pub slippage_pct: Decimal,
    /// Best price on the consumed side
    pub top_price: Decimal,
    /// Minor-currency value of the fills
    pub total_cost: Decimal,
    /// What the order would have cost filled entirely at `top_price`
    pub no_slippage_notional: Decimal,
    /// Zero on success
    pub unfilled_remainder: Decimal,
    /// Buy: `|(top - avg) * size / top|` in the major currency.
    /// Sell: `(top - avg) * size` in the minor currency.
    pub impact_value: Decimal,
    pub levels_consumed: usize,
}

/// Fill `size` (major currency) against the opposing side in price priority.
///
/// Buys consume asks from the lowest price up, sells consume bids from the highest price down. Running out of
/// levels with quantity still outstanding is reported as [`BookError::InsufficientDepth`].
pub fn simulate(book: &OrderBook, side: Side, size: Decimal) -> BookResult<ExecutionResult> {
    if size <= Decimal::ZERO {
        return Err(BookError::InvalidSize(size));
    }

    let levels = book.levels(side.consumes());
    let Some(top) = levels.first() else {
        return Err(BookError::InsufficientDepth { side, requested: size, remaining: size });
    };
    let top_price = top.price;

    let mut remaining = size;
    let mut cost = Decimal::ZERO;
    let mut levels_consumed = 0;
    for level in levels {
        let traded = remaining.min(level.amount);
        if traded > Decimal::ZERO {
            cost = traded
                .checked_mul(level.price)
                .and_then(|fill| cost.checked_add(fill))
                .ok_or(BookError::Overflow("cost"))?;
            remaining -= traded;
            levels_consumed += 1;
        }
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    if remaining > Decimal::ZERO {
        return Err(BookError::InsufficientDepth { side, requested: size, remaining });
    }

    let average_price = cost.checked_div(size).ok_or(BookError::Overflow("average price"))?;
    let slippage_pct = (average_price - top_price)
        .checked_div(top_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(BookError::Overflow("slippage"))?
        .abs();
    let shortfall = (top_price - average_price).checked_mul(size).ok_or(BookError::Overflow("impact"))?;
    let impact_value = match side {
        Side::Buy => shortfall.checked_div(top_price).ok_or(BookError::Overflow("impact"))?.abs(),
        Side::Sell => shortfall,
    };
    let no_slippage_notional = top_price.checked_mul(size).ok_or(BookError::Overflow("notional"))?;

    Ok(ExecutionResult {
        requested_size: size,
        side,
        average_price,
        slippage_pct,
        top_price,
        total_cost: cost,
        no_slippage_notional,
        unfilled_remainder: remaining.max(Decimal::ZERO),
        impact_value,
        levels_consumed,
    })
}

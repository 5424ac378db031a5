use rust_decimal::Decimal;
use serde::Serialize;

use crate::side::BookSide;

/// A single resting price level, validated once by the ladder builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    pub price: Decimal,
    /// Quantity in the major currency.
    pub amount: Decimal,
    pub side: BookSide,
}

impl PriceLevel {
    #[inline(always)]
    #[must_use]
    pub const fn new(price: Decimal, amount: Decimal, side: BookSide) -> Self {
        Self { price, amount, side }
    }

    /// Quantity expressed in the minor currency, `None` on overflow.
    #[inline(always)]
    #[must_use]
    pub fn notional(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.price)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.price > Decimal::ZERO && self.amount >= Decimal::ZERO
    }
}

use rust_decimal::Decimal;
use thiserror::Error;

use crate::side::{BookSide, Side};

pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum BookError {
    /// A raw quote could not be turned into a price level
    #[error("malformed {side} quote at index {index}: {field} {reason}")]
    MalformedQuote {
        side: BookSide,
        index: usize,
        field: &'static str,
        reason: String,
    },

    /// Depth was requested on a book with one side missing
    #[error("no {0} levels in book")]
    EmptySide(BookSide),

    /// Best ask at or below best bid
    #[error("crossed book: bid {bid} >= ask {ask}")]
    CrossedBook { bid: Decimal, ask: Decimal },

    #[error("order size must be positive, got {0}")]
    InvalidSize(Decimal),

    #[error("depth band must be positive, got {0}")]
    InvalidBand(Decimal),

    /// The visible book cannot fill the order
    #[error("{side} of {requested} exceeds available depth, {remaining} left unfilled")]
    InsufficientDepth {
        side: Side,
        requested: Decimal,
        remaining: Decimal,
    },

    /// A computed value does not fit in a `Decimal`
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("invalid side: {0}")]
    InvalidSide(String),

    #[error("invalid instrument identifier: {0}")]
    InvalidInstrument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The quote endpoint answered with `success: false`
    #[error("quote response was not successful")]
    Rejected,

    #[error(transparent)]
    Payload(#[from] serde_json::Error),
}

impl BookError {
    /// Whether a batch may continue past this failure.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientDepth { .. })
    }
}

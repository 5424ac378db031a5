use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::{BookError, BookResult};

/// A numeric field as delivered by the quote endpoint, either a JSON number or text.
///
/// JSON numbers keep their literal digits, so `19.123456789012345678` reaches [`RawValue::to_decimal`]
/// without a detour through `f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Number(Number),
    Text(String),
}

impl RawValue {
    /// Parse into a finite decimal. Returns the reason on failure.
    pub fn to_decimal(&self) -> Result<Decimal, String> {
        match self {
            Self::Number(n) => parse_decimal(&n.to_string()),
            Self::Text(s) => parse_decimal(s.trim()),
        }
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)).map_err(|_| format!("is not numeric ({s:?})"))
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self::Number(n)),
            Value::String(s) => Ok(Self::Text(s)),
            other => Err(de::Error::custom(format!("expected a number or numeric string, found {other}"))),
        }
    }
}

impl From<f64> for RawValue {
    /// NaN and infinities have no JSON form and become unparseable text.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

/// One unvalidated bid or ask record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawQuote {
    #[serde(default)]
    pub price: Option<RawValue>,
    #[serde(default)]
    pub amount: Option<RawValue>,
}

impl RawQuote {
    #[inline]
    #[must_use]
    pub fn new(price: impl Into<RawValue>, amount: impl Into<RawValue>) -> Self {
        Self { price: Some(price.into()), amount: Some(amount.into()) }
    }
}

/// The `payload` of an order book response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotePayload {
    #[serde(default)]
    pub bids: Vec<RawQuote>,
    #[serde(default)]
    pub asks: Vec<RawQuote>,
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    #[serde(default)]
    pub payload: Option<QuotePayload>,
}

impl QuoteResponse {
    pub fn from_json(body: &str) -> BookResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Unwrap the payload of a successful response.
    pub fn into_payload(self) -> BookResult<QuotePayload> {
        match (self.success, self.payload) {
            (true, Some(payload)) => Ok(payload),
            _ => Err(BookError::Rejected),
        }
    }
}

/// Parameters identifying an order book snapshot on the quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub book: String,
    pub aggregate: bool,
    pub limit: Option<u32>,
}

impl QuoteRequest {
    #[must_use]
    pub fn new(book: impl Into<String>, aggregate: bool) -> Self {
        Self { book: book.into(), aggregate, limit: None }
    }

    #[must_use]
    pub fn with_limit(self, limit: u32) -> Self {
        Self { limit: Some(limit), ..self }
    }

    /// Query string pairs in the order the endpoint documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("book", self.book.clone()), ("aggregate", self.aggregate.to_string())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

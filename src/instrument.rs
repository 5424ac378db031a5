use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// A traded pair such as `usd_mxn`: major (base) then minor (quote) currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument {
    major: String,
    minor: String,
}

impl Instrument {
    #[inline]
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    #[inline]
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self { major: "usd".to_owned(), minor: "mxn".to_owned() }
    }
}

impl FromStr for Instrument {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric());
        match s.trim().split_once('_') {
            Some((major, minor)) if valid(major) && valid(minor) => {
                Ok(Self { major: major.to_ascii_lowercase(), minor: minor.to_ascii_lowercase() })
            }
            _ => Err(BookError::InvalidInstrument(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Instrument {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Instrument> for String {
    fn from(value: Instrument) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instrument() {
        let instrument: Instrument = "USD_mxn".parse().unwrap();
        assert_eq!(instrument.major(), "usd");
        assert_eq!(instrument.minor(), "mxn");
        assert_eq!(instrument.to_string(), "usd_mxn");
    }

    #[test]
    fn test_invalid_instruments() {
        for bad in ["usdmxn", "_mxn", "usd_", "usd_mxn_eur", "us d_mxn", ""] {
            assert!(matches!(bad.parse::<Instrument>(), Err(BookError::InvalidInstrument(_))), "{bad}");
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let instrument: Instrument = serde_json::from_str(r#""btc_mxn""#).unwrap();
        assert_eq!(instrument.major(), "btc");
        assert_eq!(serde_json::to_string(&instrument).unwrap(), r#""btc_mxn""#);
        assert!(serde_json::from_str::<Instrument>(r#""btc""#).is_err());
    }
}

use async_trait::async_trait;
use emporium_core::{CoreError, CoreResult, CurrencyConverter};
use emporium_shared::money::{is_currency_code, NANOS_PER_UNIT};
use emporium_shared::{Money, MoneyError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::CatalogError;

const RATE_DECIMALS: usize = 9;

/// Amount of a currency worth one unit of the table's base currency, held as
/// a fixed-point integer with nine decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRate")]
pub struct Rate(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRate {
    Text(String),
    Whole(u64),
}

impl Rate {
    pub fn from_scaled(scaled: i64) -> Option<Self> {
        (scaled > 0).then_some(Rate(scaled))
    }

    pub fn scaled(&self) -> i64 {
        self.0
    }
}

impl FromStr for Rate {
    type Err = String;

    /// Parses plain decimals such as `"1.1305"` or `"126.40"` without going
    /// through floating point.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}' is not a decimal number", s));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}' is not a decimal number", s));
        }
        if fraction.len() > RATE_DECIMALS {
            return Err(format!("'{}' has more than {} decimals", s, RATE_DECIMALS));
        }

        let whole: i64 = whole.parse().map_err(|_| format!("'{}' is too large", s))?;
        let padded = format!("{:0<width$}", fraction, width = RATE_DECIMALS);
        let fraction: i64 = padded.parse().map_err(|_| format!("'{}' is malformed", s))?;

        let scaled = whole
            .checked_mul(i64::from(NANOS_PER_UNIT))
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(|| format!("'{}' is too large", s))?;

        Rate::from_scaled(scaled).ok_or_else(|| format!("'{}' must be positive", s))
    }
}

impl TryFrom<RawRate> for Rate {
    type Error = String;

    fn try_from(raw: RawRate) -> Result<Self, Self::Error> {
        match raw {
            RawRate::Text(text) => text.parse(),
            RawRate::Whole(whole) => i64::try_from(whole)
                .ok()
                .and_then(|w| w.checked_mul(i64::from(NANOS_PER_UNIT)))
                .and_then(Rate::from_scaled)
                .ok_or_else(|| format!("{} is not a usable rate", whole)),
        }
    }
}

/// Conversion table keyed by currency code, all rates relative to one base
/// currency (EUR in the bundled data).
pub struct CurrencyTable {
    rates: HashMap<String, Rate>,
}

impl CurrencyTable {
    pub fn new(rates: HashMap<String, Rate>) -> Result<Self, CatalogError> {
        if let Some(code) = rates.keys().find(|code| !is_currency_code(code)) {
            return Err(CatalogError::InvalidRate {
                code: code.clone(),
                reason: "not a three-letter currency code".to_string(),
            });
        }
        Ok(Self { rates })
    }

    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let raw = tokio::fs::read(&path).await.map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let table = Self::from_json(&raw, &path)?;
        tracing::info!(path = %path.display(), currencies = table.rates.len(), "Currency table loaded");
        Ok(table)
    }

    fn from_json(raw: &[u8], path: &Path) -> Result<Self, CatalogError> {
        let rates: HashMap<String, Rate> =
            serde_json::from_slice(raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(rates)
    }

    pub fn rate(&self, code: &str) -> Option<Rate> {
        self.rates.get(code).copied()
    }

    fn lookup(&self, code: &str) -> CoreResult<Rate> {
        self.rate(code)
            .ok_or_else(|| CoreError::UnsupportedCurrency(code.to_string()))
    }

    /// `floor(amount * to / from)` in nanos.
    pub fn convert_amount(&self, from: &Money, to_code: &str) -> CoreResult<Money> {
        if !from.is_valid() {
            return Err(CoreError::ValidationError(format!(
                "cannot convert invalid amount {} units={} nanos={}",
                from.currency_code, from.units, from.nanos
            )));
        }

        let from_rate = self.lookup(&from.currency_code)?;
        let to_rate = self.lookup(to_code)?;

        let scaled = from
            .total_nanos()
            .checked_mul(i128::from(to_rate.scaled()))
            .ok_or_else(|| MoneyError::Overflow(to_code.to_string()))?;
        let converted = scaled.div_euclid(i128::from(from_rate.scaled()));

        Ok(Money::from_total_nanos(to_code, converted)?)
    }
}

#[async_trait]
impl CurrencyConverter for CurrencyTable {
    async fn convert(&self, from: &Money, to_code: &str) -> CoreResult<Money> {
        let converted = self.convert_amount(from, to_code)?;
        tracing::debug!(from = %from, to = %converted, "Currency converted");
        Ok(converted)
    }

    async fn supported_currencies(&self) -> CoreResult<Vec<String>> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }
}

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of nanos in one whole currency unit.
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

const NANOS_MAX: i32 = NANOS_PER_UNIT - 1;
const NANOS_MIN: i32 = -NANOS_MAX;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Invalid money value: {0}")]
    InvalidValue(String),

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Amount out of range for {0}")]
    Overflow(String),
}

pub type MoneyResult<T> = Result<T, MoneyError>;

/// Exact fixed-point amount of a single currency.
///
/// `units` holds the whole amount and `nanos` the fractional part in
/// billionths. Both carry the same sign (or are zero), so `-1.75 EUR` is
/// `{ units: -1, nanos: -750_000_000 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub currency_code: String,
    pub units: i64,
    pub nanos: i32,
}

impl Money {
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(currency_code, 0, 0)
    }

    /// Rebuild a value from a total amount expressed in nanos.
    pub fn from_total_nanos(currency_code: impl Into<String>, total: i128) -> MoneyResult<Self> {
        let currency_code = currency_code.into();
        let per_unit = i128::from(NANOS_PER_UNIT);

        // Truncating division keeps units and nanos on the same side of zero.
        let units = match i64::try_from(total / per_unit) {
            Ok(units) => units,
            Err(_) => return Err(MoneyError::Overflow(currency_code)),
        };
        let nanos = (total % per_unit) as i32;

        Ok(Self {
            currency_code,
            units,
            nanos,
        })
    }

    /// The whole amount in nanos.
    pub fn total_nanos(&self) -> i128 {
        i128::from(self.units) * i128::from(NANOS_PER_UNIT) + i128::from(self.nanos)
    }

    /// A value is valid when its code looks like an ISO 4217 code, its nanos
    /// are within a single unit and units/nanos do not disagree on sign.
    pub fn is_valid(&self) -> bool {
        is_currency_code(&self.currency_code) && self.valid_nanos() && self.signs_match()
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    pub fn is_negative(&self) -> bool {
        self.units < 0 || self.nanos < 0
    }

    /// Add two values of the same currency, carrying nanos into units.
    pub fn sum(&self, other: &Money) -> MoneyResult<Money> {
        self.ensure_valid()?;
        other.ensure_valid()?;
        self.ensure_same_currency(other)?;

        Money::from_total_nanos(
            self.currency_code.clone(),
            self.total_nanos() + other.total_nanos(),
        )
    }

    /// Scale by a quantity. Units and nanos are scaled separately and any
    /// nanos beyond a whole unit are moved into units afterwards.
    pub fn multiply_scalar(&self, factor: u32) -> MoneyResult<Money> {
        self.ensure_valid()?;

        let per_unit = i128::from(NANOS_PER_UNIT);
        let factor = i128::from(factor);
        let scaled_units = i128::from(self.units) * factor;
        let scaled_nanos = i128::from(self.nanos) * factor;

        let units = i64::try_from(scaled_units + scaled_nanos / per_unit)
            .map_err(|_| MoneyError::Overflow(self.currency_code.clone()))?;
        let nanos = (scaled_nanos % per_unit) as i32;

        Ok(Money {
            currency_code: self.currency_code.clone(),
            units,
            nanos,
        })
    }

    /// Order two values of the same currency.
    pub fn compare(&self, other: &Money) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.total_nanos().cmp(&other.total_nanos()))
    }

    fn ensure_valid(&self) -> MoneyResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(MoneyError::InvalidValue(format!(
                "{} units={} nanos={}",
                self.currency_code, self.units, self.nanos
            )))
        }
    }

    fn ensure_same_currency(&self, other: &Money) -> MoneyResult<()> {
        if self.currency_code == other.currency_code {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency_code.clone(),
                right: other.currency_code.clone(),
            })
        }
    }

    fn valid_nanos(&self) -> bool {
        (NANOS_MIN..=NANOS_MAX).contains(&self.nanos)
    }

    fn signs_match(&self) -> bool {
        self.nanos == 0 || self.units == 0 || (self.nanos < 0) == (self.units < 0)
    }
}

/// Three uppercase ASCII letters.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Renders as `12.50 USD`, keeping at least two fraction digits and dropping
/// trailing zeros beyond that. Invalid values show their raw fields.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(
                f,
                "<invalid units={} nanos={}> {}",
                self.units, self.nanos, self.currency_code
            );
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let mut fraction = format!("{:09}", self.nanos.unsigned_abs());
        while fraction.len() > 2 && fraction.ends_with('0') {
            fraction.pop();
        }
        write!(
            f,
            "{}{}.{} {}",
            sign,
            self.units.unsigned_abs(),
            fraction,
            self.currency_code
        )
    }
}

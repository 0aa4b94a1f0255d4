use async_trait::async_trait;
use chrono::{Datelike, Utc};
use emporium_shared::{CreditCardInfo, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge `amount` to the card and return the provider's transaction id.
    async fn charge(&self, amount: &Money, card: &CreditCardInfo) -> CoreResult<String>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardType {
    /// Issuer detection from the number prefix.
    pub fn detect(number: &str) -> Self {
        let prefix = |len: usize| number.get(..len).and_then(|p| p.parse::<u32>().ok());

        if number.starts_with('4') {
            CardType::Visa
        } else if matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720)) {
            CardType::Mastercard
        } else if matches!(prefix(2), Some(34 | 37)) {
            CardType::Amex
        } else if prefix(4) == Some(6011) || prefix(2) == Some(65) {
            CardType::Discover
        } else {
            CardType::Unknown
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardType::Visa => "VISA",
            CardType::Mastercard => "MasterCard",
            CardType::Amex => "American Express",
            CardType::Discover => "Discover",
            CardType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Card processor that validates the card locally and issues a transaction id.
pub struct CardPaymentProcessor {
    accepted: Vec<CardType>,
}

impl CardPaymentProcessor {
    pub fn new(accepted: Vec<CardType>) -> Self {
        Self { accepted }
    }

    fn validate(&self, card: &CreditCardInfo) -> CoreResult<CardType> {
        let number: String = card
            .credit_card_number
            .expose()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        if !luhn_valid(&number) {
            return Err(CoreError::ValidationError(
                "Credit card info is invalid".to_string(),
            ));
        }

        let card_type = CardType::detect(&number);
        if !self.accepted.contains(&card_type) {
            return Err(CoreError::PaymentDeclined(format!(
                "Sorry, we cannot process {} credit cards",
                card_type
            )));
        }

        let month = card.credit_card_expiration_month;
        let year = card.credit_card_expiration_year;
        if !(1..=12).contains(&month) {
            return Err(CoreError::ValidationError(format!(
                "Invalid expiration month: {}",
                month
            )));
        }

        let now = Utc::now();
        if (year, month) < (now.year(), now.month()) {
            return Err(CoreError::PaymentDeclined(format!(
                "Card {} expired on {:02}/{}",
                card.masked_number(),
                month,
                year
            )));
        }

        Ok(card_type)
    }
}

impl Default for CardPaymentProcessor {
    fn default() -> Self {
        Self::new(vec![CardType::Visa, CardType::Mastercard])
    }
}

#[async_trait]
impl PaymentProcessor for CardPaymentProcessor {
    async fn charge(&self, amount: &Money, card: &CreditCardInfo) -> CoreResult<String> {
        if !amount.is_valid() || amount.is_negative() || amount.is_zero() {
            return Err(CoreError::ValidationError(format!(
                "Cannot charge amount {}",
                amount
            )));
        }

        let card_type = self.validate(card)?;
        let transaction_id = Uuid::new_v4().to_string();

        tracing::info!(
            %transaction_id,
            %card_type,
            card = %card.masked_number(),
            %amount,
            "Transaction processed"
        );
        Ok(transaction_id)
    }
}

/// Luhn checksum over an all-digit string of plausible card length.
fn luhn_valid(number: &str) -> bool {
    if !(12..=19).contains(&number.len()) || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = number
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

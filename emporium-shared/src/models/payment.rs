use serde::{Deserialize, Serialize};

use crate::pii::Masked;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardInfo {
    pub credit_card_number: Masked<String>,
    pub credit_card_cvv: Masked<i32>,
    pub credit_card_expiration_year: i32,
    pub credit_card_expiration_month: u32,
}

impl CreditCardInfo {
    /// Card number with all but the last four digits masked.
    pub fn masked_number(&self) -> String {
        self.credit_card_number.tail(4)
    }
}

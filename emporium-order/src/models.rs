use emporium_core::{CoreError, CoreResult};
use emporium_shared::money::is_currency_code;
use emporium_shared::{Address, CartItem, CreditCardInfo, Masked, Money, OrderItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the shopper submits at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub user_currency: String,
    pub address: Address,
    pub email: Masked<String>,
    pub credit_card: CreditCardInfo,
}

impl PlaceOrderRequest {
    /// Shape checks done before the orchestrator is involved.
    pub fn validate(&self) -> CoreResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::ValidationError("user_id is required".to_string()));
        }
        if !is_currency_code(&self.user_currency) {
            return Err(CoreError::ValidationError(format!(
                "user_currency must be a 3-letter ISO code, got {:?}",
                self.user_currency
            )));
        }
        if !self.email.expose().contains('@') {
            return Err(CoreError::ValidationError("email is malformed".to_string()));
        }
        if self.address.zip_code <= 0 {
            return Err(CoreError::ValidationError("zip_code must be positive".to_string()));
        }
        if self.credit_card.credit_card_number.expose().is_empty() {
            return Err(CoreError::ValidationError(
                "credit_card_number is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a checkout currently is. Failures are reported against the stage
/// that was running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStage {
    Pricing,
    Shipping,
    Payment,
    Shipment,
    CartClear,
    Notify,
    Done,
}

impl CheckoutStage {
    /// True for stages that run after the card has been charged.
    pub fn is_post_commit(&self) -> bool {
        matches!(
            self,
            CheckoutStage::Shipment | CheckoutStage::CartClear | CheckoutStage::Notify
        )
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStage::Pricing => "pricing",
            CheckoutStage::Shipping => "shipping",
            CheckoutStage::Payment => "payment",
            CheckoutStage::Shipment => "shipment",
            CheckoutStage::CartClear => "cart_clear",
            CheckoutStage::Notify => "notify",
            CheckoutStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Cart contents priced in the shopper's currency, ready to be charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPrep {
    pub cart_items: Vec<CartItem>,
    pub order_items: Vec<OrderItem>,
    pub shipping_cost: Money,
}

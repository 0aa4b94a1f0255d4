use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::CartItem;
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: i32,
}

impl Address {
    /// `street, city, state` as printed on a shipping label.
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.street_address, self.city, self.state)
    }
}

/// A cart line paired with its per-unit cost in the order currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item: CartItem,
    pub cost: Money,
}

/// The record of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: Uuid,
    pub shipping_tracking_id: String,
    pub shipping_cost: Money,
    pub shipping_address: Address,
    pub items: Vec<OrderItem>,
}

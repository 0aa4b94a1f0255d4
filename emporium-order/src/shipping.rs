use crate::pricing::ensure_currency;
use emporium_core::{CoreResult, CurrencyConverter, ShippingService};
use emporium_shared::{Address, CartItem, Money};
use std::sync::Arc;
use tracing::debug;

/// Quotes shipping for the cart and converts the quote to the shopper's
/// currency.
pub struct ShippingStep {
    shipping: Arc<dyn ShippingService>,
    currency: Arc<dyn CurrencyConverter>,
}

impl ShippingStep {
    pub fn new(shipping: Arc<dyn ShippingService>, currency: Arc<dyn CurrencyConverter>) -> Self {
        Self { shipping, currency }
    }

    pub async fn quote(
        &self,
        address: &Address,
        items: &[CartItem],
        currency_code: &str,
    ) -> CoreResult<Money> {
        let quote = self.shipping.get_quote(address, items).await?;
        let cost = self.currency.convert(&quote, currency_code).await?;
        ensure_currency(&cost, currency_code)?;

        debug!(quote = %quote, cost = %cost, "Shipping quoted");
        Ok(cost)
    }
}

use crate::pricing::ensure_currency;
use emporium_core::{CoreError, CoreResult, PaymentProcessor};
use emporium_shared::{CreditCardInfo, Money, OrderItem};
use std::sync::Arc;
use tracing::info;

pub struct PaymentStep {
    processor: Arc<dyn PaymentProcessor>,
}

impl PaymentStep {
    pub fn new(processor: Arc<dyn PaymentProcessor>) -> Self {
        Self { processor }
    }

    /// Shipping plus each line's unit cost times its quantity, accumulated
    /// left to right in exact money arithmetic.
    pub fn order_total(
        currency_code: &str,
        shipping_cost: &Money,
        items: &[OrderItem],
    ) -> CoreResult<Money> {
        ensure_currency(shipping_cost, currency_code)?;
        let mut total = Money::zero(currency_code).sum(shipping_cost)?;

        for line in items {
            let quantity = u32::try_from(line.item.quantity).map_err(|_| {
                CoreError::ValidationError(format!(
                    "quantity for {} must not be negative, got {}",
                    line.item.product_id, line.item.quantity
                ))
            })?;
            let line_total = line.cost.multiply_scalar(quantity)?;
            total = total.sum(&line_total)?;
        }
        Ok(total)
    }

    /// Charges the card and returns the processor's transaction id.
    pub async fn charge(&self, total: &Money, card: &CreditCardInfo) -> CoreResult<String> {
        let transaction_id = self.processor.charge(total, card).await?;
        info!(
            transaction_id = %transaction_id,
            amount = %total,
            card = %card.masked_number(),
            "Payment captured"
        );
        Ok(transaction_id)
    }
}

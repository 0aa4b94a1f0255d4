use crate::models::CheckoutStage;
use emporium_core::{CartStore, CoreError, CoreResult, ErrorKind, Notifier, ShippingService};
use emporium_shared::{Address, CartItem, OrderResult};
use std::sync::Arc;
use tracing::{debug, info};

/// A step that failed after the card was charged. The order still stands.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed after payment: {source}")]
pub struct PostCommitFailure {
    pub stage: CheckoutStage,
    #[source]
    pub source: CoreError,
}

impl PostCommitFailure {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::PartialPostCommitFailure
    }
}

/// Work done once payment has been captured: ship, clear the cart, and
/// tell the shopper.
pub struct FulfillmentStep {
    shipping: Arc<dyn ShippingService>,
    cart: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
}

impl FulfillmentStep {
    pub fn new(
        shipping: Arc<dyn ShippingService>,
        cart: Arc<dyn CartStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            shipping,
            cart,
            notifier,
        }
    }

    /// Hands the cart to the carrier. There is no order without a tracking id,
    /// so this one is fatal.
    pub async fn ship(&self, address: &Address, items: &[CartItem]) -> CoreResult<String> {
        let tracking_id = self.shipping.ship_order(address, items).await?;
        info!(tracking_id = %tracking_id, destination = %address.label(), "Order shipped");
        Ok(tracking_id)
    }

    pub async fn clear_cart(&self, user_id: &str) -> Result<(), PostCommitFailure> {
        self.cart
            .empty_cart(user_id)
            .await
            .map_err(|source| PostCommitFailure {
                stage: CheckoutStage::CartClear,
                source,
            })?;
        debug!(user_id, "Cart cleared after checkout");
        Ok(())
    }

    pub async fn notify(&self, email: &str, order: &OrderResult) -> Result<(), PostCommitFailure> {
        self.notifier
            .send_order_confirmation(email, order)
            .await
            .map_err(|source| PostCommitFailure {
                stage: CheckoutStage::Notify,
                source,
            })?;
        debug!(order_id = %order.order_id, "Confirmation sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{address, Harness, Script};
    use emporium_shared::Money;
    use uuid::Uuid;

    fn step(harness: &Harness) -> FulfillmentStep {
        FulfillmentStep::new(
            harness.services.shipping.clone(),
            harness.services.cart.clone(),
            harness.services.notifier.clone(),
        )
    }

    fn order() -> OrderResult {
        OrderResult {
            order_id: Uuid::new_v4(),
            shipping_tracking_id: "AB-1234-5678901".to_string(),
            shipping_cost: Money::new("USD", 8, 990_000_000),
            shipping_address: address(),
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_ship_returns_tracking_id() {
        let harness = Harness::new(Script::default());
        let tracking_id = step(&harness).ship(&address(), &[]).await.unwrap();
        assert_eq!(tracking_id, "AB-1234-5678901");
    }

    #[tokio::test]
    async fn test_post_commit_failures_carry_their_stage() {
        let harness = Harness::new(Script {
            fail_cart_empty: true,
            fail_notify: true,
            ..Script::default()
        });
        let step = step(&harness);

        let failure = step.clear_cart("user-1").await.unwrap_err();
        assert_eq!(failure.stage, CheckoutStage::CartClear);
        assert_eq!(failure.kind(), ErrorKind::PartialPostCommitFailure);
        assert!(failure.to_string().starts_with("cart_clear failed after payment"));

        let failure = step.notify("someone@example.com", &order()).await.unwrap_err();
        assert_eq!(failure.stage, CheckoutStage::Notify);
        assert!(matches!(failure.source, CoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_clear_and_notify_succeed() {
        let harness = Harness::new(Script::default());
        let step = step(&harness);
        step.clear_cart("user-1").await.unwrap();
        step.notify("someone@example.com", &order()).await.unwrap();
        assert_eq!(
            harness.calls(),
            vec!["cart.empty:user-1", "notify:someone@example.com"]
        );
    }
}

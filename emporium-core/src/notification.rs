use async_trait::async_trait;
use chrono::Utc;
use emporium_shared::OrderResult;
use std::fmt::Write;

use crate::CoreResult;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_order_confirmation(&self, email: &str, order: &OrderResult) -> CoreResult<()>;
}

/// Notifier that writes the rendered confirmation to the log instead of
/// delivering it.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(&self, email: &str, order: &OrderResult) -> CoreResult<()> {
        let body = render_confirmation(order);
        tracing::info!(
            order_id = %order.order_id,
            recipient_domain = email.rsplit('@').next().unwrap_or_default(),
            sent_at = %Utc::now().to_rfc3339(),
            "Order confirmation sent"
        );
        tracing::debug!(%body);
        Ok(())
    }
}

/// Plain-text confirmation body.
pub fn render_confirmation(order: &OrderResult) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "Your order is complete!");
    let _ = writeln!(body, "Order ID: {}", order.order_id);
    let _ = writeln!(body, "Items:");
    for line in &order.items {
        let _ = writeln!(
            body,
            "  {} x {} @ {}",
            line.item.quantity, line.item.product_id, line.cost
        );
    }
    let _ = writeln!(body, "Shipping: {}", order.shipping_cost);
    let _ = writeln!(body, "Tracking ID: {}", order.shipping_tracking_id);
    let address = &order.shipping_address;
    let _ = write!(
        body,
        "Ship to: {}, {} {}",
        address.label(),
        address.country,
        address.zip_code
    );
    body
}

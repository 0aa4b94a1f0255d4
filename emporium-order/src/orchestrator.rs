use crate::fulfillment::FulfillmentStep;
use crate::models::{CheckoutStage, OrderPrep, PlaceOrderRequest};
use crate::payment::PaymentStep;
use crate::pricing::PricingStep;
use crate::shipping::ShippingStep;
use emporium_core::{
    CartStore, CoreError, CurrencyConverter, ErrorKind, Notifier, PaymentProcessor,
    ProductCatalog, ShippingService,
};
use emporium_shared::OrderResult;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument, Span};
use uuid::Uuid;

/// The collaborators a checkout talks to.
#[derive(Clone)]
pub struct CheckoutServices {
    pub cart: Arc<dyn CartStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub currency: Arc<dyn CurrencyConverter>,
    pub shipping: Arc<dyn ShippingService>,
    pub payment: Arc<dyn PaymentProcessor>,
    pub notifier: Arc<dyn Notifier>,
}

/// Checkout aborted. `stage` is the step that was running; the card has been
/// charged only when `stage.is_post_commit()`.
#[derive(Debug, thiserror::Error)]
#[error("checkout failed during {stage}: {source}")]
pub struct CheckoutError {
    pub stage: CheckoutStage,
    #[source]
    pub source: CoreError,
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

fn at(stage: CheckoutStage) -> impl FnOnce(CoreError) -> CheckoutError {
    move |source| CheckoutError { stage, source }
}

/// Drives one checkout through pricing, shipping, payment and fulfillment.
///
/// Holds no per-order state, so a single instance serves concurrent
/// checkouts. Every checkout logs under a child of the injected span.
pub struct CheckoutOrchestrator {
    cart: Arc<dyn CartStore>,
    pricing: PricingStep,
    shipping: ShippingStep,
    payment: PaymentStep,
    fulfillment: FulfillmentStep,
    span: Span,
}

impl CheckoutOrchestrator {
    pub fn new(services: CheckoutServices) -> Self {
        Self::with_span(services, tracing::info_span!("checkout"))
    }

    pub fn with_span(services: CheckoutServices, span: Span) -> Self {
        Self {
            pricing: PricingStep::new(services.catalog, services.currency.clone()),
            shipping: ShippingStep::new(services.shipping.clone(), services.currency),
            payment: PaymentStep::new(services.payment),
            fulfillment: FulfillmentStep::new(
                services.shipping,
                services.cart.clone(),
                services.notifier,
            ),
            cart: services.cart,
            span,
        }
    }

    pub async fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> Result<OrderResult, CheckoutError> {
        let order_id = Uuid::new_v4();
        let span = tracing::info_span!(
            parent: &self.span,
            "place_order",
            order_id = %order_id,
            user_id = %request.user_id,
            currency = %request.user_currency,
        );
        self.run(order_id, request).instrument(span).await
    }

    async fn run(
        &self,
        order_id: Uuid,
        request: &PlaceOrderRequest,
    ) -> Result<OrderResult, CheckoutError> {
        info!("Placing order");

        let prep = self.prepare(request).await?;

        let total = PaymentStep::order_total(
            &request.user_currency,
            &prep.shipping_cost,
            &prep.order_items,
        )
        .map_err(at(CheckoutStage::Payment))?;
        let transaction_id = self
            .payment
            .charge(&total, &request.credit_card)
            .await
            .map_err(|e| {
                warn!(error = %e, kind = %e.kind(), "Payment failed");
                at(CheckoutStage::Payment)(e)
            })?;

        let tracking_id = self
            .fulfillment
            .ship(&request.address, &prep.cart_items)
            .await
            .map_err(|e| {
                // No compensation: the charge stands and needs manual follow-up.
                error!(
                    transaction_id = %transaction_id,
                    amount = %total,
                    error = %e,
                    "Shipment failed after payment was captured"
                );
                at(CheckoutStage::Shipment)(e)
            })?;

        if let Err(failure) = self.fulfillment.clear_cart(&request.user_id).await {
            warn!(
                stage = %failure.stage,
                kind = %failure.kind(),
                error = %failure.source,
                "Partial failure after commit"
            );
        }

        let order = OrderResult {
            order_id,
            shipping_tracking_id: tracking_id,
            shipping_cost: prep.shipping_cost,
            shipping_address: request.address.clone(),
            items: prep.order_items,
        };

        if let Err(failure) = self
            .fulfillment
            .notify(request.email.expose(), &order)
            .await
        {
            warn!(
                stage = %failure.stage,
                kind = %failure.kind(),
                error = %failure.source,
                "Partial failure after commit"
            );
        }

        info!(
            tracking_id = %order.shipping_tracking_id,
            total = %total,
            stage = %CheckoutStage::Done,
            "Order placed"
        );
        Ok(order)
    }

    /// Pricing and shipping: everything that happens before money moves.
    async fn prepare(&self, request: &PlaceOrderRequest) -> Result<OrderPrep, CheckoutError> {
        let cart_items = self
            .cart
            .get_cart(&request.user_id)
            .await
            .map_err(at(CheckoutStage::Pricing))?;
        let order_items = self
            .pricing
            .price_items(&cart_items, &request.user_currency)
            .await
            .map_err(at(CheckoutStage::Pricing))?;

        let shipping_cost = self
            .shipping
            .quote(&request.address, &cart_items, &request.user_currency)
            .await
            .map_err(at(CheckoutStage::Shipping))?;

        Ok(OrderPrep {
            cart_items,
            order_items,
            shipping_cost,
        })
    }
}

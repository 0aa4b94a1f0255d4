pub mod fulfillment;
pub mod models;
pub mod orchestrator;
pub mod payment;
pub mod pricing;
pub mod shipping;

#[cfg(test)]
mod testing;

pub use fulfillment::{FulfillmentStep, PostCommitFailure};
pub use models::{CheckoutStage, OrderPrep, PlaceOrderRequest};
pub use orchestrator::{CheckoutError, CheckoutOrchestrator, CheckoutServices};
pub use payment::PaymentStep;
pub use pricing::PricingStep;
pub use shipping::ShippingStep;

use async_trait::async_trait;
use emporium_shared::Money;

use crate::CoreResult;

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    /// Convert `from` into `to_code`. Rates are looked up on every call.
    async fn convert(&self, from: &Money, to_code: &str) -> CoreResult<Money>;

    async fn supported_currencies(&self) -> CoreResult<Vec<String>>;
}

use emporium_core::{CoreError, CoreResult, CurrencyConverter, ProductCatalog};
use emporium_shared::{CartItem, Money, MoneyError, OrderItem};
use std::sync::Arc;
use tracing::debug;

/// Looks up every cart line in the catalog and prices it in the shopper's
/// currency. Stops at the first line that fails.
pub struct PricingStep {
    catalog: Arc<dyn ProductCatalog>,
    currency: Arc<dyn CurrencyConverter>,
}

impl PricingStep {
    pub fn new(catalog: Arc<dyn ProductCatalog>, currency: Arc<dyn CurrencyConverter>) -> Self {
        Self { catalog, currency }
    }

    pub async fn price_items(
        &self,
        items: &[CartItem],
        currency_code: &str,
    ) -> CoreResult<Vec<OrderItem>> {
        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let product = self.catalog.get_product(&item.product_id).await?;
            let cost = self.currency.convert(&product.price, currency_code).await?;
            ensure_currency(&cost, currency_code)?;

            debug!(product_id = %item.product_id, unit_cost = %cost, "Priced cart line");
            priced.push(OrderItem {
                item: item.clone(),
                cost,
            });
        }
        Ok(priced)
    }
}

/// A converter answering in the wrong currency is a broken collaborator,
/// not something to paper over.
pub(crate) fn ensure_currency(money: &Money, expected: &str) -> CoreResult<()> {
    if money.currency_code != expected {
        return Err(CoreError::Money(MoneyError::CurrencyMismatch {
            left: expected.to_string(),
            right: money.currency_code.clone(),
        }));
    }
    Ok(())
}

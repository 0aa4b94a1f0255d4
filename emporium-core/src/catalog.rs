use async_trait::async_trait;
use emporium_shared::Product;

use crate::CoreResult;

/// Read-only product lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fails with `CoreError::ProductNotFound` for unknown ids.
    async fn get_product(&self, id: &str) -> CoreResult<Product>;

    async fn list_products(&self) -> CoreResult<Vec<Product>>;

    async fn search_products(&self, query: &str) -> CoreResult<Vec<Product>>;
}

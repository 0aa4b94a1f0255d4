use emporium_catalog::{AdTable, FileCatalog};
use emporium_core::{
    AdProvider, CartStore, CatalogRecommender, CurrencyConverter, ProductCatalog,
    RecommendationService,
};
use emporium_order::{CheckoutOrchestrator, CheckoutServices};
use std::sync::Arc;
use tracing::Span;

#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<dyn CartStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub currency: Arc<dyn CurrencyConverter>,
    pub checkout: Arc<CheckoutOrchestrator>,
    pub ads: Arc<dyn AdProvider>,
    pub recommendations: Arc<dyn RecommendationService>,
    /// Set when the catalog is file-backed and may be re-read at runtime.
    pub catalog_reload: Option<Arc<FileCatalog>>,
}

impl AppState {
    /// Serves no ads until `with_ads` is called.
    pub fn new(services: CheckoutServices, span: Span) -> Self {
        Self {
            cart: services.cart.clone(),
            catalog: services.catalog.clone(),
            currency: services.currency.clone(),
            ads: Arc::new(AdTable::default()),
            recommendations: Arc::new(CatalogRecommender::new(services.catalog.clone())),
            checkout: Arc::new(CheckoutOrchestrator::with_span(services, span)),
            catalog_reload: None,
        }
    }

    pub fn with_ads(mut self, ads: Arc<dyn AdProvider>) -> Self {
        self.ads = ads;
        self
    }

    pub fn with_catalog_reload(mut self, catalog: Arc<FileCatalog>) -> Self {
        self.catalog_reload = Some(catalog);
        self
    }
}

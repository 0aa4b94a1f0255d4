use async_trait::async_trait;
use emporium_core::{CoreError, CoreResult, ProductCatalog};
use emporium_shared::Product;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// Product catalog backed by a JSON document of the form
/// `{ "products": [ ... ] }`.
///
/// Readers take a cheap snapshot of the current list; `reload` swaps in a new
/// list without blocking lookups already in flight.
pub struct FileCatalog {
    source: Option<PathBuf>,
    products: RwLock<Arc<Vec<Product>>>,
}

impl FileCatalog {
    /// In-memory catalog with no backing file.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate_products(&products)?;
        Ok(Self {
            source: None,
            products: RwLock::new(Arc::new(products)),
        })
    }

    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let products = read_products(&path).await?;
        tracing::info!(path = %path.display(), count = products.len(), "Catalog loaded");

        Ok(Self {
            source: Some(path),
            products: RwLock::new(Arc::new(products)),
        })
    }

    /// Re-read the backing file. On failure the current products stay in place.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let Some(path) = &self.source else {
            return Ok(self.snapshot().await.len());
        };

        let products = match read_products(path).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Catalog reload failed, keeping previous products");
                return Err(e);
            }
        };

        let count = products.len();
        *self.products.write().await = Arc::new(products);
        tracing::info!(path = %path.display(), count, "Catalog reloaded");
        Ok(count)
    }

    async fn snapshot(&self) -> Arc<Vec<Product>> {
        self.products.read().await.clone()
    }
}

#[async_trait]
impl ProductCatalog for FileCatalog {
    async fn get_product(&self, id: &str) -> CoreResult<Product> {
        self.snapshot()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        Ok(self.snapshot().await.as_ref().clone())
    }

    async fn search_products(&self, query: &str) -> CoreResult<Vec<Product>> {
        Ok(self
            .snapshot()
            .await
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect())
    }
}

async fn read_products(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let raw = tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: CatalogDocument =
        serde_json::from_slice(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    validate_products(&document.products)?;
    Ok(document.products)
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    for product in products {
        if product.id.is_empty() {
            return Err(CatalogError::InvalidProduct {
                id: product.name.clone(),
                reason: "empty id".to_string(),
            });
        }
        if !product.price.is_valid() || product.price.is_negative() {
            return Err(CatalogError::InvalidProduct {
                id: product.id.clone(),
                reason: format!("invalid price {}", product.price),
            });
        }
    }
    Ok(())
}

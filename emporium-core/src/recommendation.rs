use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;

use crate::{CoreResult, ProductCatalog};

pub const MAX_RECOMMENDATIONS: usize = 5;

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Product ids to suggest next to `product_ids`, never including them.
    async fn list_recommendations(&self, product_ids: &[String]) -> CoreResult<Vec<String>>;
}

/// Samples the rest of the catalog at random.
pub struct CatalogRecommender {
    catalog: Arc<dyn ProductCatalog>,
    limit: usize,
}

impl CatalogRecommender {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            catalog,
            limit: MAX_RECOMMENDATIONS,
        }
    }
}

#[async_trait]
impl RecommendationService for CatalogRecommender {
    async fn list_recommendations(&self, product_ids: &[String]) -> CoreResult<Vec<String>> {
        let products = self.catalog.list_products().await?;
        let excluded: HashSet<&str> = product_ids.iter().map(String::as_str).collect();
        let candidates: Vec<String> = products
            .into_iter()
            .map(|p| p.id)
            .filter(|id| !excluded.contains(id.as_str()))
            .collect();

        let picked = sample(candidates, self.limit);
        tracing::debug!(product_ids = ?picked, "Recommendations issued");
        Ok(picked)
    }
}

/// Everything when there are at most `limit` candidates, otherwise `limit`
/// distinct ones chosen at random.
fn sample(candidates: Vec<String>, limit: usize) -> Vec<String> {
    if candidates.len() <= limit {
        return candidates;
    }
    let mut rng = rand::thread_rng();
    candidates
        .choose_multiple(&mut rng, limit)
        .cloned()
        .collect()
}

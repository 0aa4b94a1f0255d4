use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use emporium_shared::Ad;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AdList {
    ads: Vec<Ad>,
}

#[derive(Debug, Serialize)]
struct Recommendations {
    product_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AdParams {
    #[serde(default)]
    context_keys: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationParams {
    #[serde(default)]
    product_ids: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/ads", get(get_ads))
        .route("/v1/recommendations", get(list_recommendations))
}

/// Comma-separated query value, blanks dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

async fn get_ads(
    State(state): State<AppState>,
    Query(params): Query<AdParams>,
) -> Result<Json<AdList>, AppError> {
    let ads = state.ads.get_ads(&split_list(&params.context_keys)).await?;
    Ok(Json(AdList { ads }))
}

async fn list_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<Recommendations>, AppError> {
    let product_ids = state
        .recommendations
        .list_recommendations(&split_list(&params.product_ids))
        .await?;
    Ok(Json(Recommendations { product_ids }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("kitchen, decor,,"), vec!["kitchen", "decor"]);
        assert!(split_list("").is_empty());
    }
}

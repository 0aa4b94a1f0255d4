use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use emporium_shared::Product;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ProductList {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products))
        .route("/v1/products/search", get(search_products))
        .route("/v1/products/{id}", get(get_product))
}

async fn list_products(State(state): State<AppState>) -> Result<Json<ProductList>, AppError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(ProductList { products }))
}

async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ProductList>, AppError> {
    let products = state.catalog.search_products(&params.q).await?;
    Ok(Json(ProductList { products }))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.catalog.get_product(&id).await?))
}

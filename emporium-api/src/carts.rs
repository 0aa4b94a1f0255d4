use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use emporium_shared::CartItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CartResponse {
    user_id: String,
    items: Vec<CartItem>,
}

#[derive(Debug, Deserialize)]
struct AddItemRequest {
    product_id: String,
    quantity: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/carts/{user_id}", get(get_cart).delete(empty_cart))
        .route("/v1/carts/{user_id}/items", post(add_item))
}

async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    let items = state.cart.get_cart(&user_id).await?;
    Ok(Json(CartResponse { user_id, items }))
}

async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    // Unknown products never make it into a cart.
    state.catalog.get_product(&req.product_id).await?;
    state
        .cart
        .add_item(&user_id, &req.product_id, req.quantity)
        .await?;

    let items = state.cart.get_cart(&user_id).await?;
    Ok(Json(CartResponse { user_id, items }))
}

async fn empty_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.cart.empty_cart(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use emporium_order::PlaceOrderRequest;
use emporium_shared::OrderResult;
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/checkout", post(place_order))
}

async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResult>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    req.validate()?;

    info!(
        user_id = %req.user_id,
        currency = %req.user_currency,
        card = %req.credit_card.masked_number(),
        "Checkout requested"
    );
    let order = state.checkout.place_order(&req).await?;
    Ok(Json(order))
}

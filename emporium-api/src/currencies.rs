use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use emporium_shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CurrencyList {
    currency_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConvertRequest {
    from: Money,
    to_code: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/currencies", get(supported_currencies))
        .route("/v1/currencies/convert", post(convert))
}

async fn supported_currencies(
    State(state): State<AppState>,
) -> Result<Json<CurrencyList>, AppError> {
    let currency_codes = state.currency.supported_currencies().await?;
    Ok(Json(CurrencyList { currency_codes }))
}

async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<Money>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    if !req.from.is_valid() {
        return Err(AppError::ValidationError(format!(
            "invalid amount {}",
            req.from
        )));
    }
    Ok(Json(state.currency.convert(&req.from, &req.to_code).await?))
}

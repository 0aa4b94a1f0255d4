use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Reloaded {
    products: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/catalog/reload", post(reload_catalog))
}

/// Re-reads the product file. A failed reload keeps serving the old list.
async fn reload_catalog(State(state): State<AppState>) -> Result<Json<Reloaded>, AppError> {
    let catalog = state
        .catalog_reload
        .as_ref()
        .ok_or_else(|| AppError::NotFoundError("Catalog reload is not enabled".to_string()))?;
    let products = catalog.reload().await?;
    Ok(Json(Reloaded { products }))
}

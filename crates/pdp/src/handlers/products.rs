//! Product detail handler.

use axum::{
    extract::{Path, State},
    Json,
};

use pdp_core::product::{validate_sku, Product};

use crate::{handlers::AppError, state::AppState};

/// Get a single active product by SKU (GET /products/{sku}).
pub async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<Product>, AppError> {
    validate_sku(&sku)?;

    let product = state.lookup.find_by_sku(&sku).await?;

    Ok(Json(product))
}

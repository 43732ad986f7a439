//! Product catalog handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Product;

use crate::core::ServerState;
use crate::db::repository::ProductRepository;

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// GET /api/products/{product_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_id(&product_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", product_id)
    })?;
    Ok(Json(product))
}

//! Cart API handlers
//!
//! Every mutation returns the full recomputed [`CartView`] so the UI
//! always renders derived totals, never locally accumulated ones.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, AppResult};
use shared::models::{
    AddItemRequest, ApplyPromotionRequest, Cart, ClaimWheelGiftRequest, UpdateQuantityRequest,
};
use validator::Validate;

use crate::cart::CartView;
use crate::core::ServerState;

/// POST /api/cart: open a new empty cart
pub async fn create(State(state): State<ServerState>) -> AppResult<Json<Cart>> {
    let cart = state.cart_service().create_cart().await?;
    Ok(Json(cart))
}

/// GET /api/cart/{cart_id}
pub async fn get_view(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let view = state.cart_service().view(&cart_id).await?;
    Ok(Json(view))
}

/// POST /api/cart/{cart_id}/items
pub async fn add_item(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<CartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let view = state.cart_service().add_item(&cart_id, payload).await?;
    Ok(Json(view))
}

/// PUT /api/cart/{cart_id}/items/{item_key}
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path((cart_id, item_key)): Path<(String, String)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<CartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let view = state
        .cart_service()
        .update_quantity(&cart_id, &item_key, payload.quantity)
        .await?;
    Ok(Json(view))
}

/// DELETE /api/cart/{cart_id}/items/{item_key}
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((cart_id, item_key)): Path<(String, String)>,
) -> AppResult<Json<CartView>> {
    let view = state.cart_service().remove_item(&cart_id, &item_key).await?;
    Ok(Json(view))
}

/// POST /api/cart/{cart_id}/promotion
pub async fn apply_promotion(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
    Json(payload): Json<ApplyPromotionRequest>,
) -> AppResult<Json<CartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let view = state
        .cart_service()
        .apply_promotion(&cart_id, &payload.code)
        .await?;
    Ok(Json(view))
}

/// DELETE /api/cart/{cart_id}/promotion
pub async fn remove_promotion(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let view = state.cart_service().remove_promotion(&cart_id).await?;
    Ok(Json(view))
}

/// POST /api/cart/{cart_id}/wheel-gift: sync a won wheel prize
pub async fn claim_wheel_gift(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
    Json(payload): Json<ClaimWheelGiftRequest>,
) -> AppResult<Json<CartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let view = state
        .cart_service()
        .claim_wheel_gift(&cart_id, payload)
        .await?;
    Ok(Json(view))
}

/// POST /api/cart/{cart_id}/refresh-prices
pub async fn refresh_prices(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let view = state.cart_service().refresh_prices(&cart_id).await?;
    Ok(Json(view))
}

//! Orders and dispute handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::{Dispute, DisputeMessage, Order, OrderStatus, PostMessageRequest};
use validator::Validate;

use crate::core::ServerState;
use crate::orders::DisputeThread;

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service().list().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{order_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.order_service().get(&order_id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// PUT /api/orders/{order_id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .update_status(&order_id, payload.status)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders/{order_id}/dispute
pub async fn dispute_thread(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<DisputeThread>> {
    let thread = state.order_service().dispute_thread(&order_id).await?;
    Ok(Json(thread))
}

/// POST /api/orders/{order_id}/dispute/messages
pub async fn post_message(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<PostMessageRequest>,
) -> AppResult<Json<DisputeMessage>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let message = state
        .order_service()
        .post_message(&order_id, payload.sender, &payload.body)
        .await?;
    Ok(Json(message))
}

/// POST /api/orders/{order_id}/dispute/close
pub async fn close_dispute(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Dispute>> {
    let dispute = state.order_service().close_dispute(&order_id).await?;
    Ok(Json(dispute))
}

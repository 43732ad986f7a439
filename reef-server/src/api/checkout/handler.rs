//! Checkout API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::{CarrierKind, Order};
use validator::Validate;

use crate::checkout::{CheckoutRequest, CheckoutSession, ConfirmRequest, ShippingQuote};
use crate::core::ServerState;

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub carrier: CarrierKind,
    /// Pre-shipping total (subtotal minus discount)
    pub total: f64,
}

/// GET /api/checkout/quote?carrier=...&total=...
pub async fn shipping_quote(
    State(state): State<ServerState>,
    Query(params): Query<QuoteParams>,
) -> AppResult<Json<ShippingQuote>> {
    let quote = state
        .checkout_service()
        .shipping_quote(params.carrier, params.total);
    Ok(Json(quote))
}

/// POST /api/checkout/{cart_id}/session
///
/// Reconciles the cart and creates the hosted payment session.
pub async fn create_session(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutSession>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let session = state
        .checkout_service()
        .create_session(&cart_id, &payload)
        .await?;
    Ok(Json(session))
}

/// POST /api/checkout/confirm (payment confirmation callback)
pub async fn confirm(
    State(state): State<ServerState>,
    Json(payload): Json<ConfirmRequest>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let order = state
        .checkout_service()
        .confirm(&payload.session_id)
        .await?;
    Ok(Json(order))
}

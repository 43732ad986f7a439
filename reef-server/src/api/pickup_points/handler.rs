//! Pickup point lookup handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::PickupPoint;

use crate::core::ServerState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub postal_code: String,
}

/// GET /api/pickup-points?postal_code=...
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<PickupPoint>>> {
    let points = state.pickup_service().search(&params.postal_code).await?;
    Ok(Json(points))
}

//! HTTP API
//!
//! One module per resource, each exposing a `router()` in the same
//! shape: route table in `mod.rs`, handlers in `handler.rs`.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod pickup_points;
pub mod products;

use crate::core::ServerState;
use axum::Router;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(pickup_points::router())
        .merge(orders::router())
        .with_state(state)
}

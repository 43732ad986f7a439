//! Checkout API module

mod handler;

use crate::core::ServerState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/quote", get(handler::shipping_quote))
        .route("/{cart_id}/session", post(handler::create_session))
        .route("/confirm", post(handler::confirm))
}

//! Orders and dispute API module

mod handler;

use crate::core::ServerState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{order_id}", get(handler::get_by_id))
        .route("/{order_id}/status", put(handler::update_status))
        .route("/{order_id}/dispute", get(handler::dispute_thread))
        .route("/{order_id}/dispute/messages", post(handler::post_message))
        .route("/{order_id}/dispute/close", post(handler::close_dispute))
}

//! Cart API module

mod handler;

use crate::core::ServerState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{cart_id}", get(handler::get_view))
        .route("/{cart_id}/items", post(handler::add_item))
        .route(
            "/{cart_id}/items/{item_key}",
            put(handler::update_quantity).delete(handler::remove_item),
        )
        .route(
            "/{cart_id}/promotion",
            post(handler::apply_promotion).delete(handler::remove_promotion),
        )
        .route("/{cart_id}/wheel-gift", post(handler::claim_wheel_gift))
        .route("/{cart_id}/refresh-prices", post(handler::refresh_prices))
}

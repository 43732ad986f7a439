//! Product catalog API module

mod handler;

use crate::core::ServerState;
use axum::{Router, routing::get};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{product_id}", get(handler::get_by_id))
}

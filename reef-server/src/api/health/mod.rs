//! Health check module

mod handler;

use crate::core::ServerState;
use axum::{Router, routing::get};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(handler::health))
}

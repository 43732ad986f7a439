//! Shared types for the Récif storefront
//!
//! Common types used across crates: domain models, the unified error
//! system and the API response envelope.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;

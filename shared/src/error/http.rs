//! HTTP integration for [`AppError`]

use super::types::AppError;
use crate::response::ApiResponse;
use axum::Json;
use axum::response::{IntoResponse, Response};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let mut body = ApiResponse::<serde_json::Value>::error(
            self.code.as_code_string(),
            self.message.clone(),
        );
        if let Some(details) = &self.details {
            body.data = serde_json::to_value(details).ok();
        }
        (status, Json(body)).into_response()
    }
}

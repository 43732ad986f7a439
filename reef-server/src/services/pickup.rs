//! Relay-carrier pickup point lookup

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::PickupPoint;

/// Client for the relay carrier's pickup point search API
#[derive(Clone)]
pub struct PickupService {
    client: reqwest::Client,
    base_url: String,
}

impl PickupService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Pickup points around a postal code
    pub async fn search(&self, postal_code: &str) -> AppResult<Vec<PickupPoint>> {
        if postal_code.trim().is_empty() {
            return Err(AppError::validation("postal_code is required"));
        }

        let url = format!("{}/pickup-points", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("postal_code", postal_code)])
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::UpstreamUnavailable,
                    format!("Pickup lookup unreachable: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::UpstreamUnavailable,
                format!("Pickup lookup returned {}", response.status()),
            ));
        }

        response.json::<Vec<PickupPoint>>().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::UpstreamUnavailable,
                format!("Pickup lookup returned malformed data: {e}"),
            )
        })
    }
}

//! Payment provider client
//!
//! Given the reconciled checkout payload, the provider returns a hosted
//! checkout redirect URL. Provider errors are surfaced unmodified.

use crate::checkout::{CheckoutPayload, CheckoutSession};
use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider rejected the session; message passed through as-is
    #[error("{0}")]
    Provider(String),

    /// Network-level failure reaching the provider
    #[error("Payment provider unreachable: {0}")]
    Transport(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Provider(msg) => {
                AppError::with_message(ErrorCode::PaymentProviderError, msg)
            }
            PaymentError::Transport(msg) => {
                AppError::with_message(ErrorCode::UpstreamUnavailable, msg)
            }
        }
    }
}

/// Payment-session creation contract
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_session(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// HTTP implementation against the configured provider endpoint
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPaymentProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn create_session(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Payment provider rejected checkout session");
            let message = if body.is_empty() {
                format!("payment provider returned {status}")
            } else {
                body
            };
            return Err(PaymentError::Provider(message));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))
    }
}

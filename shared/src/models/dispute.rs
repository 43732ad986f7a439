//! Customer-support dispute ("litige") models
//!
//! One append-only message thread per order. Once the dispute is closed
//! the client can no longer write; the support side still can.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderRole {
    Client,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    Open,
    Closed,
}

/// Dispute thread, keyed by order id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    pub order_id: String,
    pub status: DisputeStatus,
    /// Opened at (Unix millis)
    pub opened_at: i64,
}

/// Single message in a dispute thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeMessage {
    pub order_id: String,
    pub sender: SenderRole,
    pub body: String,
    /// Sent at (Unix millis)
    pub sent_at: i64,
}

/// Post-message request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessageRequest {
    pub sender: SenderRole,
    #[validate(length(min = 1, message = "message body is required"))]
    pub body: String,
}

//! Promotion models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionKind {
    Percentage,
    Fixed,
}

/// Promotion code entity
///
/// `code` is stored upper-cased and matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub code: String,
    pub kind: PromotionKind,
    /// Percentage (30 = 30%) or fixed amount (5.00 = 5 €)
    pub value: f64,
    pub is_active: bool,
    /// Expiry (Unix millis); None = never expires
    pub expires_at: Option<i64>,
    /// Max redemptions; None = unlimited
    pub usage_limit: Option<i64>,
    pub usage_count: i64,
    /// Minimum payable subtotal to qualify
    pub min_order_amount: Option<f64>,
}

/// Promotion as applied to a cart
///
/// Only the rule is stored; the discount amount is re-derived from the
/// current payable subtotal every time totals are computed, so removing
/// items can never leave a stale discount behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedPromotion {
    pub code: String,
    pub kind: PromotionKind,
    pub value: f64,
}

impl From<&Promotion> for AppliedPromotion {
    fn from(promotion: &Promotion) -> Self {
        Self {
            code: promotion.code.clone(),
            kind: promotion.kind,
            value: promotion.value,
        }
    }
}

/// Apply-promotion request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyPromotionRequest {
    #[validate(length(min = 1))]
    pub code: String,
}

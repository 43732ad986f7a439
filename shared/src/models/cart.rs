//! Cart and line item models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::promotion::AppliedPromotion;

/// Line item kind
///
/// Gift kinds are always treated as price 0 for payment purposes; their
/// stored price is display-only ("value of your gift").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Regular,
    ThresholdGift,
    WheelGift,
}

/// Cart entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart identifier (UUID)
    pub cart_id: String,
    /// Applied promotion, if any (discount amount is always re-derived)
    pub promotion: Option<AppliedPromotion>,
    /// Created at (Unix millis)
    pub created_at: i64,
    /// Last mutation (Unix millis)
    pub updated_at: i64,
}

/// Cart line item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Owning cart
    pub cart_id: String,
    /// Product/variant/gift identity, unique within the cart
    pub item_key: String,
    /// Product record the line was built from
    pub product_id: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Effective unit price at last refresh (a cache, re-resolved at checkout)
    pub unit_price: f64,
    /// Pre-discount reference price
    pub original_price: Option<f64>,
    /// Active discount percentage (0–100)
    pub discount_percentage: Option<u8>,
    /// Quantity (>= 1; gifts are fixed at 1)
    pub quantity: i32,
    /// Pipe-delimited `name:value` pairs
    pub variant: Option<String>,
    pub kind: ItemKind,
    /// Stock cap on quantity increments
    pub stock_limit: Option<i32>,
    /// Idempotence key (ThresholdGift only)
    pub threshold_id: Option<String>,
    /// Grant time (WheelGift only, Unix millis)
    pub won_at: Option<i64>,
    /// Expiry (WheelGift only, Unix millis; None = no expiry)
    pub expires_at: Option<i64>,
}

impl CartLineItem {
    /// Whether this line is a gift of either kind
    pub fn is_gift(&self) -> bool {
        matches!(self.kind, ItemKind::ThresholdGift | ItemKind::WheelGift)
    }

    /// Whether this wheel gift is past its expiry at `now` (Unix millis)
    ///
    /// Non-wheel items and wheel gifts without expiry never expire.
    pub fn is_expired(&self, now: i64) -> bool {
        self.kind == ItemKind::WheelGift
            && self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Add-to-cart request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1))]
    pub product_id: String,
    pub variant: Option<String>,
    /// Defaults to 1 when absent
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

/// Quantity update request payload (0 removes the line)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuantityRequest {
    #[validate(range(min = 0))]
    pub quantity: i32,
}

/// Wheel prize claim payload. The wheel itself runs outside the cart;
/// this syncs a won prize into it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClaimWheelGiftRequest {
    #[validate(length(min = 1))]
    pub product_id: String,
    pub variant: Option<String>,
    /// Grant time (Unix millis); defaults to now
    pub won_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel_item(expires_at: Option<i64>) -> CartLineItem {
        CartLineItem {
            cart_id: "c1".to_string(),
            item_key: "wheel:p1".to_string(),
            product_id: "p1".to_string(),
            title: "Prize".to_string(),
            image_url: None,
            unit_price: 9.90,
            original_price: None,
            discount_percentage: None,
            quantity: 1,
            variant: None,
            kind: ItemKind::WheelGift,
            stock_limit: None,
            threshold_id: None,
            won_at: Some(1_000),
            expires_at,
        }
    }

    #[test]
    fn test_wheel_gift_expiry() {
        let item = wheel_item(Some(5_000));
        assert!(!item.is_expired(5_000), "boundary is not yet expired");
        assert!(item.is_expired(5_001));
    }

    #[test]
    fn test_wheel_gift_without_expiry_never_expires() {
        let item = wheel_item(None);
        assert!(!item.is_expired(i64::MAX));
    }

    #[test]
    fn test_regular_item_never_expires() {
        let mut item = wheel_item(Some(0));
        item.kind = ItemKind::Regular;
        assert!(!item.is_expired(i64::MAX));
    }
}

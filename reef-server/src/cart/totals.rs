//! Pure totals derivation over a cart snapshot

use super::money::{to_decimal, to_f64};
use crate::promotions::discount_amount;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{AppliedPromotion, CartLineItem, ItemKind, ThresholdProgress};

/// Payable subtotal: `Σ unit_price × quantity` over regular items only
///
/// Gift items never contribute, whatever their stored reference price.
pub fn payable_subtotal(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .filter(|item| item.kind == ItemKind::Regular)
        .map(|item| to_decimal(item.unit_price) * Decimal::from(item.quantity))
        .sum()
}

/// Derived cart totals
#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

/// Compute totals from a snapshot, re-deriving the promotion discount
/// from the current subtotal
pub fn compute_totals(items: &[CartLineItem], promotion: Option<&AppliedPromotion>) -> CartTotals {
    let subtotal = payable_subtotal(items);
    let discount = promotion
        .map(|p| discount_amount(p, subtotal))
        .unwrap_or(Decimal::ZERO);
    let total = (subtotal - discount).max(Decimal::ZERO);
    CartTotals {
        subtotal: to_f64(subtotal),
        discount: to_f64(discount),
        total: to_f64(total),
    }
}

/// Line item plus derived display state
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartLineItem,
    /// Wheel gift past its expiry but not yet swept: rendered as
    /// expired, blocks checkout until removed
    pub expired: bool,
}

/// Full cart view returned by every cart endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<CartItemView>,
    pub promotion: Option<AppliedPromotion>,
    pub totals: CartTotals,
    pub threshold_progress: ThresholdProgress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PromotionKind;

    fn item(kind: ItemKind, price: f64, quantity: i32) -> CartLineItem {
        CartLineItem {
            cart_id: "c1".to_string(),
            item_key: format!("{kind:?}-{price}"),
            product_id: "p".to_string(),
            title: "item".to_string(),
            image_url: None,
            unit_price: price,
            original_price: None,
            discount_percentage: None,
            quantity,
            variant: None,
            kind,
            stock_limit: None,
            threshold_id: None,
            won_at: None,
            expires_at: None,
        }
    }

    #[test]
    fn test_subtotal_ignores_gifts() {
        let items = vec![
            item(ItemKind::Regular, 25.0, 2),
            item(ItemKind::ThresholdGift, 4.90, 1),
            item(ItemKind::WheelGift, 19.90, 1),
        ];
        assert_eq!(to_f64(payable_subtotal(&items)), 50.0);
    }

    #[test]
    fn test_totals_without_promotion() {
        let items = vec![item(ItemKind::Regular, 12.34, 3)];
        let totals = compute_totals(&items, None);
        assert_eq!(totals.subtotal, 37.02);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.total, 37.02);
    }

    #[test]
    fn test_totals_with_percentage_promotion() {
        let items = vec![item(ItemKind::Regular, 25.0, 2)];
        let promo = AppliedPromotion {
            code: "SAVE10".to_string(),
            kind: PromotionKind::Percentage,
            value: 10.0,
        };
        let totals = compute_totals(&items, Some(&promo));
        assert_eq!(totals.subtotal, 50.0);
        assert_eq!(totals.discount, 5.0);
        assert_eq!(totals.total, 45.0);
    }

    #[test]
    fn test_total_never_negative() {
        let items = vec![item(ItemKind::Regular, 5.0, 1)];
        let promo = AppliedPromotion {
            code: "MOINS20".to_string(),
            kind: PromotionKind::Fixed,
            value: 20.0,
        };
        let totals = compute_totals(&items, Some(&promo));
        assert_eq!(totals.discount, 5.0, "fixed discount floors at subtotal");
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_gift_only_cart_has_zero_subtotal() {
        let items = vec![
            item(ItemKind::ThresholdGift, 4.90, 1),
            item(ItemKind::WheelGift, 19.90, 1),
        ];
        let totals = compute_totals(&items, None);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}

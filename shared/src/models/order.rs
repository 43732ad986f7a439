//! Order models

use serde::{Deserialize, Serialize};

use super::customer::CustomerForm;
use super::shipping::{CarrierKind, PickupPoint};

/// Order status
///
/// Transitions are forward-only along the fulfilment path; `Cancelled`
/// is reachable from `PendingPayment` and `Paid` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (*self, next) {
            (PendingPayment, Paid) => true,
            (Paid, Preparing) => true,
            (Preparing, Shipped) => true,
            (Shipped, Delivered) => true,
            (PendingPayment, Cancelled) | (Paid, Cancelled) => true,
            _ => false,
        }
    }
}

/// Order line snapshot
///
/// Gift lines are zero-priced and carried for fulfilment visibility only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_key: String,
    pub title: String,
    pub quantity: i32,
    pub unit_price: f64,
    /// Payment provider reference (None for gift and shipping lines)
    pub payment_ref: Option<String>,
    pub is_gift: bool,
}

/// Order entity, snapshotted at payment-session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub cart_id: String,
    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub promotion_code: Option<String>,
    pub customer: CustomerForm,
    pub carrier: CarrierKind,
    pub pickup_point: Option<PickupPoint>,
    /// Payment provider session, used for idempotent confirmation
    pub provider_session_id: String,
    pub status: OrderStatus,
    /// Created at (Unix millis)
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn test_forward_transitions() {
        assert!(PendingPayment.can_transition_to(Paid));
        assert!(Paid.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!Paid.can_transition_to(PendingPayment));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Shipped.can_transition_to(Preparing));
    }

    #[test]
    fn test_cancellation_window() {
        assert!(PendingPayment.can_transition_to(Cancelled));
        assert!(Paid.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Paid));
    }
}

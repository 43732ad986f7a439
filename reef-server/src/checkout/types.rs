//! Checkout payload and request types

use serde::{Deserialize, Serialize};
use shared::models::{CarrierKind, CustomerForm, OrderLine, PickupPoint};
use validator::Validate;

/// Provider-facing payload assembled by the reconciler
///
/// Payable lines carry re-resolved prices and payment references; gift
/// lines are zero-priced and included for fulfilment visibility only;
/// shipping appears as a synthetic line when non-free.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutPayload {
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
}

/// Hosted checkout session returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub session_id: String,
    pub redirect_url: String,
}

/// Checkout request: carrier choice plus customer form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub carrier: CarrierKind,
    pub pickup_point: Option<PickupPoint>,
    #[validate(nested)]
    pub customer: CustomerForm,
}

/// Payment confirmation callback payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
}

/// Shipping quote for a carrier at a given pre-shipping total
#[derive(Debug, Clone, Serialize)]
pub struct ShippingQuote {
    pub carrier: CarrierKind,
    pub shipping_cost: f64,
    pub free_shipping_threshold: f64,
    pub free: bool,
}

//! Shipping carrier models

use serde::{Deserialize, Serialize};

/// Supported carriers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierKind {
    /// Ships to the customer's postal address
    HomeDelivery,
    /// Ships to a pickup point selected from the relay network
    RelayPoint,
}

/// Per-carrier pricing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarrierRates {
    pub base_price: f64,
    /// Orders at or above this pre-shipping total ship free
    pub free_shipping_threshold: f64,
}

/// Relay pickup point, as returned by the carrier lookup service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupPoint {
    pub pickup_id: String,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
}


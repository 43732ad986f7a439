//! Cart threshold models

use serde::{Deserialize, Serialize};

/// Threshold gift rule: crossing `value` with the payable subtotal grants
/// the referenced product as a free line item; dropping back revokes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartThreshold {
    /// Idempotence key for the granted gift line
    pub threshold_id: String,
    /// Minimum payable subtotal to unlock
    pub value: f64,
    pub gift_product_id: String,
    pub gift_variant: Option<String>,
    /// Shown once the threshold is unlocked
    pub message: Option<String>,
}

/// Derived threshold progress for the cart view
///
/// The first unmet threshold drives the remaining-amount hint; the
/// highest met threshold supplies the unlocked message.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThresholdProgress {
    /// Value of the first unmet threshold
    pub next_threshold: Option<f64>,
    /// Amount still missing to reach it
    pub remaining_amount: Option<f64>,
    /// Message of the highest met threshold
    pub unlocked_message: Option<String>,
}

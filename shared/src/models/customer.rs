//! Customer checkout form

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal address, required for home delivery
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
}

/// Customer fields collected at checkout
///
/// Name, email and phone are always required; the address is only
/// required for the home-delivery carrier (checked by the reconciler,
/// not here).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(nested)]
    pub address: Option<Address>,
}

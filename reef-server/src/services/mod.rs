//! External collaborator clients
//!
//! The payment provider and the relay-carrier pickup lookup are consumed
//! through their HTTP contracts only; both are constructor-injected so
//! tests can substitute stubs.

mod payment;
mod pickup;

pub use payment::{HttpPaymentProvider, PaymentError, PaymentProvider};
pub use pickup::PickupService;

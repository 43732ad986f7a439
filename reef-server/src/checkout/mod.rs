//! Checkout Reconciler
//!
//! At payment-session creation the cart's cached prices are thrown away:
//! every payable line is re-resolved against the pricing resolver, gifts
//! are separated out, the customer form and carrier requirements are
//! validated, and only then is the provider-facing payload assembled.
//! Every rejection keeps the cart and form intact, so the operation is
//! retryable after correction.

mod reconciler;
mod types;

pub use reconciler::CheckoutService;
pub use types::{CheckoutPayload, CheckoutRequest, CheckoutSession, ConfirmRequest, ShippingQuote};

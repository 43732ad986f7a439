//! Domain models for the Récif storefront
//!
//! Plain serde structs shared between the server crates. Monetary fields
//! are euros with 2-decimal precision, serialized as `f64`; timestamps
//! are Unix milliseconds.

pub mod cart;
pub mod customer;
pub mod dispute;
pub mod order;
pub mod product;
pub mod promotion;
pub mod shipping;
pub mod threshold;
pub mod wheel;

pub use cart::{AddItemRequest, Cart, CartLineItem, ClaimWheelGiftRequest, ItemKind, UpdateQuantityRequest};
pub use customer::{Address, CustomerForm};
pub use dispute::{Dispute, DisputeMessage, DisputeStatus, PostMessageRequest, SenderRole};
pub use order::{Order, OrderLine, OrderStatus};
pub use product::{Product, ProductVariant};
pub use promotion::{AppliedPromotion, ApplyPromotionRequest, Promotion, PromotionKind};
pub use shipping::{CarrierKind, CarrierRates, PickupPoint};
pub use threshold::{CartThreshold, ThresholdProgress};
pub use wheel::WheelGiftSettings;

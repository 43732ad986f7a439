//! Gift Lifecycle Manager
//!
//! Two independent gift mechanisms share this module:
//!
//! - **Threshold gifts** are granted and revoked automatically as the
//!   payable subtotal crosses the configured thresholds.
//! - **Wheel gifts** are won externally, synced into the cart with a TTL
//!   derived from the wheel settings, and purged by a periodic sweep
//!   once expired. An expired-but-unswept gift still renders (flagged)
//!   and blocks checkout.

mod manager;
mod scheduler;

pub use manager::GiftManager;
pub use scheduler::{ExpirySweeper, SettingsWatcher};

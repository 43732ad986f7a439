//! Récif storefront server
//!
//! Commerce backend for the aquarium-supply shop: cart store with
//! promotion codes and gamified gifts, checkout reconciliation against
//! the payment provider, two shipping carriers, and order management
//! with customer-support dispute threads.
//!
//! # Module structure
//!
//! ```text
//! reef-server/src/
//! ├── core/          # configuration, state, server, background tasks
//! ├── db/            # embedded SurrealDB + repositories
//! ├── pricing/       # pricing resolver
//! ├── promotions/    # promotion engine
//! ├── cart/          # cart store, money helpers, totals derivation
//! ├── gifts/         # gift lifecycle (thresholds, wheel gifts, sweep)
//! ├── checkout/      # checkout reconciler + payment session lifecycle
//! ├── orders/        # orders and dispute threads
//! ├── services/      # payment provider + pickup lookup clients
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod gifts;
pub mod orders;
pub mod pricing;
pub mod promotions;
pub mod services;
pub mod utils;

// Re-export public types
pub use cart::CartService;
pub use checkout::CheckoutService;
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use gifts::GiftManager;
pub use orders::OrderService;
pub use pricing::PriceResolver;
pub use promotions::PromotionEngine;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger;

/// Load `.env` and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

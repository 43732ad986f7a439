//! Server state: shared handles for every service
//!
//! `ServerState` holds the configuration, the database handle and the
//! external collaborator clients. Domain services are thin wrappers over
//! the database handle and are constructed on demand by the accessors.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::CartService;
use crate::checkout::CheckoutService;
use crate::core::Config;
use crate::db::DbService;
use crate::gifts::GiftManager;
use crate::orders::OrderService;
use crate::pricing::PriceResolver;
use crate::services::{HttpPaymentProvider, PaymentProvider, PickupService};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    payment: Arc<dyn PaymentProvider>,
    pickup: PickupService,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        payment: Arc<dyn PaymentProvider>,
        pickup: PickupService,
    ) -> Self {
        Self {
            config,
            db,
            payment,
            pickup,
        }
    }

    /// Initialize the production state: on-disk database plus HTTP
    /// clients for the payment and pickup collaborators
    pub async fn initialize(config: &Config) -> Result<Self, shared::error::AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).map_err(|e| {
            shared::error::AppError::internal(format!("Failed to create database dir: {e}"))
        })?;
        let db_path = db_dir.join("recif.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let payment: Arc<dyn PaymentProvider> = Arc::new(HttpPaymentProvider::new(
            config.payment_api_url.clone(),
            config.payment_api_key.clone(),
        ));
        let pickup = PickupService::new(config.pickup_api_url.clone());

        Ok(Self::new(config.clone(), db_service.db, payment, pickup))
    }

    // ==================== service accessors ====================

    pub fn cart_service(&self) -> CartService {
        CartService::new(self.db.clone())
    }

    pub fn checkout_service(&self) -> CheckoutService {
        CheckoutService::new(self.db.clone(), self.payment.clone(), self.config.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone())
    }

    pub fn gift_manager(&self) -> GiftManager {
        GiftManager::new(self.db.clone())
    }

    pub fn price_resolver(&self) -> PriceResolver {
        PriceResolver::new(self.db.clone())
    }

    pub fn pickup_service(&self) -> &PickupService {
        &self.pickup
    }
}

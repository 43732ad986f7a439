//! Server configuration for the storefront node
//!
//! # Environment variables
//!
//! Every item can be overridden through the environment:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/recif | work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development / staging / production |
//! | PAYMENT_API_URL | https://api.payment.example | payment provider endpoint |
//! | PAYMENT_API_KEY | (empty) | payment provider secret key |
//! | PAYMENT_MIN_CHARGEABLE | 0.50 | provider minimum chargeable amount (€) |
//! | PICKUP_API_URL | https://api.relay.example | pickup point lookup endpoint |
//! | HOME_DELIVERY_BASE_PRICE | 6.90 | home carrier base price (€) |
//! | HOME_DELIVERY_FREE_THRESHOLD | 59.00 | home carrier free-shipping threshold (€) |
//! | RELAY_POINT_BASE_PRICE | 4.50 | relay carrier base price (€) |
//! | RELAY_POINT_FREE_THRESHOLD | 49.00 | relay carrier free-shipping threshold (€) |
//! | GIFT_SWEEP_INTERVAL_MS | 1000 | wheel gift expiry sweep period (clamped 1000–5000) |
//! | WHEEL_POLL_INTERVAL_MS | 5000 | wheel settings poll period |
//!
//! # Example
//!
//! ```ignore
//! WORK_DIR=/data/recif HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

use shared::models::{CarrierKind, CarrierRates};

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Payment provider ===
    pub payment_api_url: String,
    pub payment_api_key: String,
    /// Fixed small-amount floor imposed by the provider
    pub payment_min_chargeable: f64,

    // === Shipping carriers ===
    pub pickup_api_url: String,
    pub home_delivery: CarrierRates,
    pub relay_point: CarrierRates,

    // === Gift lifecycle timers ===
    /// Wheel gift expiry sweep period (milliseconds, 1000–5000)
    pub gift_sweep_interval_ms: u64,
    /// Wheel settings poll period (milliseconds)
    pub wheel_poll_interval_ms: u64,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/recif".into()),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            payment_api_url: std::env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.payment.example".into()),
            payment_api_key: std::env::var("PAYMENT_API_KEY").unwrap_or_default(),
            payment_min_chargeable: env_or("PAYMENT_MIN_CHARGEABLE", 0.50),

            pickup_api_url: std::env::var("PICKUP_API_URL")
                .unwrap_or_else(|_| "https://api.relay.example".into()),
            home_delivery: CarrierRates {
                base_price: env_or("HOME_DELIVERY_BASE_PRICE", 6.90),
                free_shipping_threshold: env_or("HOME_DELIVERY_FREE_THRESHOLD", 59.00),
            },
            relay_point: CarrierRates {
                base_price: env_or("RELAY_POINT_BASE_PRICE", 4.50),
                free_shipping_threshold: env_or("RELAY_POINT_FREE_THRESHOLD", 49.00),
            },

            // The sweep must stay within 1–5s so an expired gift never
            // lingers long enough to look redeemable.
            gift_sweep_interval_ms: env_or("GIFT_SWEEP_INTERVAL_MS", 1_000).clamp(1_000, 5_000),
            wheel_poll_interval_ms: env_or("WHEEL_POLL_INTERVAL_MS", 5_000),
        }
    }

    /// Rates of the selected carrier
    pub fn carrier_rates(&self, carrier: CarrierKind) -> CarrierRates {
        match carrier {
            CarrierKind::HomeDelivery => self.home_delivery,
            CarrierKind::RelayPoint => self.relay_point,
        }
    }

    /// Database directory under the work dir
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory under the work dir
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval_clamped() {
        // Sweep cadence is held to the accepted 1–5s range.
        let config = Config::from_env();
        assert!((1_000..=5_000).contains(&config.gift_sweep_interval_ms));
    }

    #[test]
    fn test_carrier_rates_lookup() {
        let config = Config::from_env();
        let home = config.carrier_rates(CarrierKind::HomeDelivery);
        let relay = config.carrier_rates(CarrierKind::RelayPoint);
        assert!(home.base_price > relay.base_price);
    }
}

//! Gift lifecycle operations

use crate::cart::money::to_decimal;
use crate::cart::totals::payable_subtotal;
use crate::db::repository::{
    CartRepository, RepoError, RepoResult, ThresholdRepository, WheelSettingsRepository,
};
use crate::pricing::PriceResolver;
use rust_decimal::Decimal;
use shared::models::{CartLineItem, CartThreshold, ItemKind, ThresholdProgress, WheelGiftSettings};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct GiftManager {
    carts: CartRepository,
    thresholds: ThresholdRepository,
    wheel: WheelSettingsRepository,
    resolver: PriceResolver,
}

impl GiftManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            thresholds: ThresholdRepository::new(db.clone()),
            wheel: WheelSettingsRepository::new(db.clone()),
            resolver: PriceResolver::new(db),
        }
    }

    // ==================== threshold gifts ====================

    /// Reconcile threshold gifts with the current payable subtotal
    ///
    /// Inserts the gift of every newly met threshold and removes the
    /// gift of every threshold no longer met, keyed by `threshold_id`.
    /// Idempotent: repeated calls on an unchanged cart are no-ops, and a
    /// gift is never duplicated. All met thresholds keep their gifts
    /// simultaneously.
    pub async fn sync_threshold_gifts(&self, cart_id: &str) -> RepoResult<()> {
        let items = self.carts.list_items(cart_id).await?;
        let subtotal = payable_subtotal(&items);
        let thresholds = self.thresholds.find_all_ordered().await?;

        for threshold in &thresholds {
            let met = subtotal >= to_decimal(threshold.value);
            let present = items.iter().any(|item| {
                item.kind == ItemKind::ThresholdGift
                    && item.threshold_id.as_deref() == Some(threshold.threshold_id.as_str())
            });

            if met && !present {
                self.grant_threshold_gift(cart_id, threshold).await?;
            } else if !met && present {
                let key = threshold_item_key(threshold);
                self.carts.remove_item(cart_id, &key).await?;
                tracing::debug!(cart_id, threshold = %threshold.threshold_id, "Threshold gift revoked");
            }
        }
        Ok(())
    }

    async fn grant_threshold_gift(
        &self,
        cart_id: &str,
        threshold: &CartThreshold,
    ) -> RepoResult<()> {
        let resolved = match self
            .resolver
            .resolve(&threshold.gift_product_id, threshold.gift_variant.as_deref())
            .await
        {
            Ok(resolved) => resolved,
            Err(RepoError::NotFound(msg)) => {
                // A misconfigured threshold must not break cart mutations.
                tracing::warn!(threshold = %threshold.threshold_id, "{msg}; gift skipped");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.carts
            .insert_item(CartLineItem {
                cart_id: cart_id.to_string(),
                item_key: threshold_item_key(threshold),
                product_id: threshold.gift_product_id.clone(),
                title: resolved.title,
                image_url: resolved.image_url,
                // Display value only: gifts are priced 0 at payment.
                unit_price: resolved.unit_price,
                original_price: resolved.original_price,
                discount_percentage: resolved.discount_percentage,
                quantity: 1,
                variant: threshold.gift_variant.clone(),
                kind: ItemKind::ThresholdGift,
                stock_limit: None,
                threshold_id: Some(threshold.threshold_id.clone()),
                won_at: None,
                expires_at: None,
            })
            .await?;
        tracing::debug!(cart_id, threshold = %threshold.threshold_id, "Threshold gift granted");
        Ok(())
    }

    /// Threshold progress for the cart view
    ///
    /// The first unmet threshold drives the remaining-amount hint; the
    /// highest met threshold supplies the unlocked message.
    pub fn threshold_progress(
        subtotal: Decimal,
        thresholds: &[CartThreshold],
    ) -> ThresholdProgress {
        let mut progress = ThresholdProgress::default();
        for threshold in thresholds {
            if subtotal >= to_decimal(threshold.value) {
                progress.unlocked_message = threshold.message.clone();
            } else {
                progress.next_threshold = Some(threshold.value);
                progress.remaining_amount = Some(crate::cart::money::to_f64(
                    to_decimal(threshold.value) - subtotal,
                ));
                break;
            }
        }
        progress
    }

    pub async fn thresholds(&self) -> RepoResult<Vec<CartThreshold>> {
        self.thresholds.find_all_ordered().await
    }

    // ==================== wheel gifts ====================

    /// Sync a wheel prize won externally into the cart
    ///
    /// At most one wheel gift per product/variant; claiming an already
    /// claimed prize returns the existing line unchanged.
    pub async fn claim_wheel_gift(
        &self,
        cart_id: &str,
        product_id: &str,
        variant: Option<&str>,
        won_at: i64,
    ) -> RepoResult<CartLineItem> {
        let item_key = wheel_item_key(product_id, variant);
        if let Some(existing) = self.carts.find_item(cart_id, &item_key).await? {
            return Ok(existing);
        }

        let resolved = self.resolver.resolve(product_id, variant).await?;
        let settings = self.wheel.get().await?;

        let item = CartLineItem {
            cart_id: cart_id.to_string(),
            item_key,
            product_id: product_id.to_string(),
            title: resolved.title,
            image_url: resolved.image_url,
            unit_price: resolved.unit_price,
            original_price: resolved.original_price,
            discount_percentage: resolved.discount_percentage,
            quantity: 1,
            variant: variant.map(str::to_string),
            kind: ItemKind::WheelGift,
            stock_limit: None,
            threshold_id: None,
            won_at: Some(won_at),
            expires_at: Some(won_at + settings.delay_millis()),
        };
        self.carts.insert_item(item).await
    }

    /// Retroactively recompute `expires_at` of every un-expired wheel
    /// gift after the participation delay changed
    ///
    /// Returns the number of gifts whose expiry moved. Already-expired
    /// gifts are left alone; there is no way back from expired.
    pub async fn resync_wheel_ttls(
        &self,
        settings: &WheelGiftSettings,
        now: i64,
    ) -> RepoResult<usize> {
        let items = self.carts.list_wheel_items().await?;
        let mut touched = 0;
        for item in items {
            if item.is_expired(now) {
                continue;
            }
            let Some(won_at) = item.won_at else { continue };
            let new_expiry = Some(won_at + settings.delay_millis());
            if new_expiry != item.expires_at {
                self.carts
                    .set_item_expiry(&item.cart_id, &item.item_key, new_expiry)
                    .await?;
                touched += 1;
            }
        }
        if touched > 0 {
            tracing::info!(
                touched,
                delay_hours = settings.participation_delay_hours,
                "Wheel gift expiries resynced to new participation delay"
            );
        }
        Ok(touched)
    }

    /// Purge wheel gifts past their expiry; returns how many were removed
    pub async fn sweep_expired(&self, now: i64) -> RepoResult<usize> {
        let items = self.carts.list_wheel_items().await?;
        let mut removed = 0;
        for item in items.iter().filter(|item| item.is_expired(now)) {
            self.carts.remove_item(&item.cart_id, &item.item_key).await?;
            removed += 1;
            tracing::info!(
                cart_id = %item.cart_id,
                item = %item.title,
                "Expired wheel gift removed from cart"
            );
        }
        Ok(removed)
    }

    pub async fn wheel_settings(&self) -> RepoResult<WheelGiftSettings> {
        self.wheel.get().await
    }
}

/// Line item key of a threshold gift
pub fn threshold_item_key(threshold: &CartThreshold) -> String {
    format!("threshold:{}", threshold.threshold_id)
}

/// Line item key of a wheel gift
pub fn wheel_item_key(product_id: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("wheel:{}@{}", product_id, variant),
        None => format!("wheel:{}", product_id),
    }
}

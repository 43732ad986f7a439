//! Cart mutation service
//!
//! Every mutation persists through the repositories first, then the gift
//! manager re-reads the rows it needs. No decision is made from a value
//! captured before the write, so two rapid edits resolve against current
//! state whichever acknowledgment lands first.

use crate::cart::totals::{CartItemView, CartView, compute_totals, payable_subtotal};
use crate::db::repository::{CartRepository, RepoError};
use crate::gifts::GiftManager;
use crate::pricing::{PriceResolver, ResolvedPrice};
use crate::promotions::PromotionEngine;
use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AddItemRequest, Cart, CartLineItem, ClaimWheelGiftRequest, ItemKind,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CartService {
    carts: CartRepository,
    resolver: PriceResolver,
    promotions: PromotionEngine,
    gifts: GiftManager,
}

impl CartService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            resolver: PriceResolver::new(db.clone()),
            promotions: PromotionEngine::new(db.clone()),
            gifts: GiftManager::new(db),
        }
    }

    pub async fn create_cart(&self) -> AppResult<Cart> {
        Ok(self.carts.create().await?)
    }

    /// Load the cart or fail with `CartNotFound`
    async fn require_cart(&self, cart_id: &str) -> AppResult<Cart> {
        self.carts
            .find(cart_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CartNotFound).with_detail("cart_id", cart_id))
    }

    /// Assemble the full cart view with derived totals
    pub async fn view(&self, cart_id: &str) -> AppResult<CartView> {
        let cart = self.require_cart(cart_id).await?;
        let items = self.carts.list_items(cart_id).await?;
        let totals = compute_totals(&items, cart.promotion.as_ref());

        let thresholds = self.gifts.thresholds().await?;
        let threshold_progress =
            GiftManager::threshold_progress(payable_subtotal(&items), &thresholds);

        let now = Utc::now().timestamp_millis();
        Ok(CartView {
            cart_id: cart.cart_id,
            items: items
                .into_iter()
                .map(|item| CartItemView {
                    expired: item.is_expired(now),
                    item,
                })
                .collect(),
            promotion: cart.promotion,
            totals,
            threshold_progress,
        })
    }

    /// Add a product to the cart, merging by item key
    ///
    /// Quantity increments beyond the stock limit are rejected before
    /// any mutation; there is no partial increment.
    pub async fn add_item(&self, cart_id: &str, request: AddItemRequest) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        let quantity = request.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }

        let resolved = self
            .resolve_for_cart(&request.product_id, request.variant.as_deref())
            .await?;
        let item_key = regular_item_key(&request.product_id, request.variant.as_deref());

        match self.carts.find_item(cart_id, &item_key).await? {
            Some(existing) => {
                let new_quantity = existing.quantity + quantity;
                check_stock(resolved.stock.or(existing.stock_limit), new_quantity)?;
                self.carts
                    .set_quantity(cart_id, &item_key, new_quantity)
                    .await?;
                // The resolver just gave us a fresh price; update the cache.
                self.carts
                    .set_price(
                        cart_id,
                        &item_key,
                        resolved.unit_price,
                        resolved.original_price,
                        resolved.discount_percentage,
                    )
                    .await?;
            }
            None => {
                check_stock(resolved.stock, quantity)?;
                self.carts
                    .insert_item(CartLineItem {
                        cart_id: cart_id.to_string(),
                        item_key: item_key.clone(),
                        product_id: request.product_id.clone(),
                        title: resolved.title.clone(),
                        image_url: resolved.image_url.clone(),
                        unit_price: resolved.unit_price,
                        original_price: resolved.original_price,
                        discount_percentage: resolved.discount_percentage,
                        quantity,
                        variant: request.variant.clone(),
                        kind: ItemKind::Regular,
                        stock_limit: resolved.stock,
                        threshold_id: None,
                        won_at: None,
                        expires_at: None,
                    })
                    .await?;
            }
        }

        self.gifts.sync_threshold_gifts(cart_id).await?;
        self.view(cart_id).await
    }

    /// Set the quantity of a line; 0 removes it
    pub async fn update_quantity(
        &self,
        cart_id: &str,
        item_key: &str,
        quantity: i32,
    ) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        let item = self
            .carts
            .find_item(cart_id, item_key)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound).with_detail("item_key", item_key))?;

        if item.is_gift() {
            return Err(AppError::new(ErrorCode::NotModifiable));
        }
        if quantity < 0 {
            return Err(AppError::validation("quantity must not be negative"));
        }

        if quantity == 0 {
            self.carts.remove_item(cart_id, item_key).await?;
        } else {
            check_stock(item.stock_limit, quantity)?;
            self.carts.set_quantity(cart_id, item_key, quantity).await?;
        }

        self.gifts.sync_threshold_gifts(cart_id).await?;
        self.view(cart_id).await
    }

    /// Remove a line unconditionally (gifts included)
    pub async fn remove_item(&self, cart_id: &str, item_key: &str) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        self.carts.remove_item(cart_id, item_key).await?;
        self.gifts.sync_threshold_gifts(cart_id).await?;
        self.view(cart_id).await
    }

    /// Validate and apply a promotion code against the current subtotal
    pub async fn apply_promotion(&self, cart_id: &str, code: &str) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        let items = self.carts.list_items(cart_id).await?;
        let subtotal = payable_subtotal(&items);
        let now = Utc::now().timestamp_millis();

        let applied = self.promotions.validate(code, subtotal, now).await?;
        self.carts.set_promotion(cart_id, Some(applied)).await?;
        self.view(cart_id).await
    }

    /// Clear the applied promotion unconditionally
    pub async fn remove_promotion(&self, cart_id: &str) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        self.carts.set_promotion(cart_id, None).await?;
        self.view(cart_id).await
    }

    /// Sync an externally won wheel prize into the cart
    pub async fn claim_wheel_gift(
        &self,
        cart_id: &str,
        request: ClaimWheelGiftRequest,
    ) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        let won_at = request
            .won_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        self.gifts
            .claim_wheel_gift(
                cart_id,
                &request.product_id,
                request.variant.as_deref(),
                won_at,
            )
            .await
            .map_err(|e| match e {
                RepoError::NotFound(msg) => {
                    AppError::with_message(ErrorCode::ProductNotFound, msg)
                }
                other => other.into(),
            })?;
        self.view(cart_id).await
    }

    /// Re-resolve the cached unit price of every regular line
    pub async fn refresh_prices(&self, cart_id: &str) -> AppResult<CartView> {
        self.require_cart(cart_id).await?;
        let items = self.carts.list_items(cart_id).await?;
        for item in items.iter().filter(|i| i.kind == ItemKind::Regular) {
            match self
                .resolver
                .resolve(&item.product_id, item.variant.as_deref())
                .await
            {
                Ok(resolved) => {
                    self.carts
                        .set_price(
                            cart_id,
                            &item.item_key,
                            resolved.unit_price,
                            resolved.original_price,
                            resolved.discount_percentage,
                        )
                        .await?;
                }
                Err(RepoError::NotFound(msg)) => {
                    // Keep the cached price; checkout will reject the line.
                    tracing::warn!(item = %item.item_key, "{msg}; cached price kept");
                }
                Err(e) => return Err(e.into()),
            }
        }
        self.gifts.sync_threshold_gifts(cart_id).await?;
        self.view(cart_id).await
    }

    /// Empty the cart (payment confirmed)
    pub async fn clear(&self, cart_id: &str) -> AppResult<()> {
        self.carts.clear_items(cart_id).await?;
        self.carts.set_promotion(cart_id, None).await?;
        Ok(())
    }

    async fn resolve_for_cart(
        &self,
        product_id: &str,
        variant: Option<&str>,
    ) -> AppResult<ResolvedPrice> {
        self.resolver
            .resolve(product_id, variant)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(msg) => {
                    AppError::with_message(ErrorCode::ProductNotFound, msg)
                }
                other => other.into(),
            })
    }
}

/// Line item key of a regular product line
pub fn regular_item_key(product_id: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("{}@{}", product_id, variant),
        None => product_id.to_string(),
    }
}

fn check_stock(stock_limit: Option<i32>, requested: i32) -> AppResult<()> {
    if let Some(limit) = stock_limit {
        if requested > limit {
            return Err(AppError::new(ErrorCode::StockExceeded)
                .with_detail("stock_limit", limit)
                .with_detail("requested", requested));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{ProductRepository, PromotionRepository, ThresholdRepository};
    use shared::models::{CartThreshold, Product, Promotion, PromotionKind};

    async fn seed() -> (CartService, String) {
        let db = DbService::memory().await.unwrap();
        let products = ProductRepository::new(db.db.clone());
        products
            .create(Product {
                product_id: "sel-recifal".to_string(),
                title: "Sel récifal 20kg".to_string(),
                image_url: None,
                price: 25.0,
                payment_ref: "price_sel".to_string(),
                discount_percentage: None,
                discounted_payment_ref: None,
                stock: Some(5),
                variants: vec![],
            })
            .await
            .unwrap();
        products
            .create(Product {
                product_id: "bandelettes".to_string(),
                title: "Bandelettes de test".to_string(),
                image_url: None,
                price: 4.90,
                payment_ref: "price_bandelettes".to_string(),
                discount_percentage: None,
                discounted_payment_ref: None,
                stock: None,
                variants: vec![],
            })
            .await
            .unwrap();

        ThresholdRepository::new(db.db.clone())
            .create(CartThreshold {
                threshold_id: "t40".to_string(),
                value: 40.0,
                gift_product_id: "bandelettes".to_string(),
                gift_variant: None,
                message: Some("Bandelettes offertes !".to_string()),
            })
            .await
            .unwrap();

        PromotionRepository::new(db.db.clone())
            .create(Promotion {
                code: "SAVE10".to_string(),
                kind: PromotionKind::Percentage,
                value: 10.0,
                is_active: true,
                expires_at: None,
                usage_limit: None,
                usage_count: 0,
                min_order_amount: None,
            })
            .await
            .unwrap();

        let service = CartService::new(db.db.clone());
        let cart = service.create_cart().await.unwrap();
        (service, cart.cart_id)
    }

    fn add(product_id: &str, quantity: i32) -> AddItemRequest {
        AddItemRequest {
            product_id: product_id.to_string(),
            variant: None,
            quantity: Some(quantity),
        }
    }

    #[tokio::test]
    async fn test_add_item_merges_by_key() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 1)).await.unwrap();
        let view = service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();

        let regular: Vec<_> = view
            .items
            .iter()
            .filter(|i| i.item.kind == ItemKind::Regular)
            .collect();
        assert_eq!(regular.len(), 1);
        assert_eq!(regular[0].item.quantity, 3);
    }

    #[tokio::test]
    async fn test_stock_limit_rejected_without_partial_increment() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 4)).await.unwrap();

        let err = service
            .add_item(&cart_id, add("sel-recifal", 2))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StockExceeded);

        // State untouched by the rejected increment.
        let view = service.view(&cart_id).await.unwrap();
        let item = view
            .items
            .iter()
            .find(|i| i.item.kind == ItemKind::Regular)
            .unwrap();
        assert_eq!(item.item.quantity, 4);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let (service, cart_id) = seed().await;
        let err = service
            .add_item(&cart_id, add("anemone", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[tokio::test]
    async fn test_threshold_gift_follows_subtotal() {
        let (service, cart_id) = seed().await;

        // 2 × 25.00 crosses the 40 € threshold.
        let view = service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();
        assert!(
            view.items
                .iter()
                .any(|i| i.item.kind == ItemKind::ThresholdGift)
        );
        assert_eq!(
            view.threshold_progress.unlocked_message.as_deref(),
            Some("Bandelettes offertes !")
        );

        // Dropping to 25.00 revokes the gift in the same update.
        let view = service
            .update_quantity(&cart_id, "sel-recifal", 1)
            .await
            .unwrap();
        assert!(
            view.items
                .iter()
                .all(|i| i.item.kind != ItemKind::ThresholdGift)
        );
        assert_eq!(view.threshold_progress.remaining_amount, Some(15.0));
    }

    #[tokio::test]
    async fn test_gift_quantity_not_modifiable() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();

        let err = service
            .update_quantity(&cart_id, "threshold:t40", 3)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotModifiable);
    }

    #[tokio::test]
    async fn test_quantity_zero_removes_line() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();
        let view = service
            .update_quantity(&cart_id, "sel-recifal", 0)
            .await
            .unwrap();
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_promotion_recomputed_after_removal() {
        // 2 × 25.00 plus the threshold gift, then SAVE10.
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();
        let view = service.apply_promotion(&cart_id, "save10").await.unwrap();
        assert_eq!(view.totals.subtotal, 50.0);
        assert_eq!(view.totals.discount, 5.0);
        assert_eq!(view.totals.total, 45.0);

        // qty → 1: gift revoked, discount re-derived from 25.00.
        let view = service
            .update_quantity(&cart_id, "sel-recifal", 1)
            .await
            .unwrap();
        assert_eq!(view.totals.subtotal, 25.0);
        assert_eq!(view.totals.discount, 2.5);
        assert_eq!(view.totals.total, 22.5);
        assert!(
            view.items
                .iter()
                .all(|i| i.item.kind != ItemKind::ThresholdGift)
        );
    }

    #[tokio::test]
    async fn test_remove_promotion_is_unconditional() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();
        service.apply_promotion(&cart_id, "SAVE10").await.unwrap();

        let view = service.remove_promotion(&cart_id).await.unwrap();
        assert!(view.promotion.is_none());
        assert_eq!(view.totals.total, 50.0);

        // Removing again is still fine.
        service.remove_promotion(&cart_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_subtotal_ignores_wheel_gift_value() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 1)).await.unwrap();
        let view = service
            .claim_wheel_gift(
                &cart_id,
                ClaimWheelGiftRequest {
                    product_id: "bandelettes".to_string(),
                    variant: None,
                    won_at: Some(1_000),
                },
            )
            .await
            .unwrap();

        assert_eq!(view.totals.subtotal, 25.0);
        assert!(view.items.iter().any(|i| i.item.kind == ItemKind::WheelGift));
    }

    #[tokio::test]
    async fn test_expired_wheel_gift_flagged_in_view() {
        let (service, cart_id) = seed().await;
        service
            .claim_wheel_gift(
                &cart_id,
                ClaimWheelGiftRequest {
                    product_id: "bandelettes".to_string(),
                    variant: None,
                    won_at: Some(1_000), // expired long ago
                },
            )
            .await
            .unwrap();

        let view = service.view(&cart_id).await.unwrap();
        let wheel = view
            .items
            .iter()
            .find(|i| i.item.kind == ItemKind::WheelGift)
            .unwrap();
        assert!(wheel.expired);
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_promotion() {
        let (service, cart_id) = seed().await;
        service.add_item(&cart_id, add("sel-recifal", 2)).await.unwrap();
        service.apply_promotion(&cart_id, "SAVE10").await.unwrap();

        service.clear(&cart_id).await.unwrap();
        let view = service.view(&cart_id).await.unwrap();
        assert!(view.items.is_empty());
        assert!(view.promotion.is_none());
        assert_eq!(view.totals.total, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_cart_is_not_found() {
        let (service, _) = seed().await;
        let err = service.view("missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartNotFound);
    }
}

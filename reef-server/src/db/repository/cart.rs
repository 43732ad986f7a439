//! Cart Repository
//!
//! Rows for the `cart` and `cart_item` collections. Line items are
//! addressed by `(cart_id, item_key)`.

use super::{BaseRepository, RepoError, RepoResult};
use chrono::Utc;
use shared::models::{AppliedPromotion, Cart, CartLineItem, ItemKind};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

const CART_TABLE: &str = "cart";
const ITEM_TABLE: &str = "cart_item";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ==================== cart ====================

    /// Create a fresh empty cart
    pub async fn create(&self) -> RepoResult<Cart> {
        let now = Utc::now().timestamp_millis();
        let cart = Cart {
            cart_id: Uuid::new_v4().to_string(),
            promotion: None,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Cart> = self.base.db().create(CART_TABLE).content(cart).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    pub async fn find(&self, cart_id: &str) -> RepoResult<Option<Cart>> {
        let cart_id = cart_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE cart_id = $cart_id LIMIT 1")
            .bind(("cart_id", cart_id))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Set or clear the applied promotion
    pub async fn set_promotion(
        &self,
        cart_id: &str,
        promotion: Option<AppliedPromotion>,
    ) -> RepoResult<()> {
        let cart_id = cart_id.to_string();
        let now = Utc::now().timestamp_millis();
        self.base
            .db()
            .query("UPDATE cart SET promotion = $promotion, updated_at = $now WHERE cart_id = $cart_id")
            .bind(("promotion", promotion))
            .bind(("now", now))
            .bind(("cart_id", cart_id))
            .await?;
        Ok(())
    }

    async fn touch(&self, cart_id: &str) -> RepoResult<()> {
        let cart_id = cart_id.to_string();
        let now = Utc::now().timestamp_millis();
        self.base
            .db()
            .query("UPDATE cart SET updated_at = $now WHERE cart_id = $cart_id")
            .bind(("now", now))
            .bind(("cart_id", cart_id))
            .await?;
        Ok(())
    }

    // ==================== cart items ====================

    pub async fn list_items(&self, cart_id: &str) -> RepoResult<Vec<CartLineItem>> {
        let cart_id = cart_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE cart_id = $cart_id ORDER BY item_key ASC")
            .bind(("cart_id", cart_id))
            .await?;
        let items: Vec<CartLineItem> = result.take(0)?;
        Ok(items)
    }

    pub async fn find_item(
        &self,
        cart_id: &str,
        item_key: &str,
    ) -> RepoResult<Option<CartLineItem>> {
        let cart_id = cart_id.to_string();
        let item_key = item_key.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE cart_id = $cart_id AND item_key = $item_key LIMIT 1")
            .bind(("cart_id", cart_id))
            .bind(("item_key", item_key))
            .await?;
        let items: Vec<CartLineItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Insert a new line item (caller guarantees the key is not present)
    pub async fn insert_item(&self, item: CartLineItem) -> RepoResult<CartLineItem> {
        let cart_id = item.cart_id.clone();
        let created: Option<CartLineItem> =
            self.base.db().create(ITEM_TABLE).content(item).await?;
        self.touch(&cart_id).await?;
        created.ok_or_else(|| RepoError::Database("Failed to insert cart item".to_string()))
    }

    pub async fn set_quantity(
        &self,
        cart_id: &str,
        item_key: &str,
        quantity: i32,
    ) -> RepoResult<()> {
        let owned_cart = cart_id.to_string();
        let item_key = item_key.to_string();
        self.base
            .db()
            .query("UPDATE cart_item SET quantity = $quantity WHERE cart_id = $cart_id AND item_key = $item_key")
            .bind(("quantity", quantity))
            .bind(("cart_id", owned_cart))
            .bind(("item_key", item_key))
            .await?;
        self.touch(cart_id).await?;
        Ok(())
    }

    /// Refresh the cached price fields of a line
    pub async fn set_price(
        &self,
        cart_id: &str,
        item_key: &str,
        unit_price: f64,
        original_price: Option<f64>,
        discount_percentage: Option<u8>,
    ) -> RepoResult<()> {
        let cart_id = cart_id.to_string();
        let item_key = item_key.to_string();
        self.base
            .db()
            .query(
                "UPDATE cart_item SET unit_price = $unit_price, original_price = $original_price, \
                 discount_percentage = $discount_percentage \
                 WHERE cart_id = $cart_id AND item_key = $item_key",
            )
            .bind(("unit_price", unit_price))
            .bind(("original_price", original_price))
            .bind(("discount_percentage", discount_percentage))
            .bind(("cart_id", cart_id))
            .bind(("item_key", item_key))
            .await?;
        Ok(())
    }

    pub async fn remove_item(&self, cart_id: &str, item_key: &str) -> RepoResult<()> {
        let owned_cart = cart_id.to_string();
        let item_key = item_key.to_string();
        self.base
            .db()
            .query("DELETE cart_item WHERE cart_id = $cart_id AND item_key = $item_key")
            .bind(("cart_id", owned_cart))
            .bind(("item_key", item_key))
            .await?;
        self.touch(cart_id).await?;
        Ok(())
    }

    /// Remove every line of the cart (payment confirmed)
    pub async fn clear_items(&self, cart_id: &str) -> RepoResult<()> {
        let owned_cart = cart_id.to_string();
        self.base
            .db()
            .query("DELETE cart_item WHERE cart_id = $cart_id")
            .bind(("cart_id", owned_cart))
            .await?;
        self.touch(cart_id).await?;
        Ok(())
    }

    // ==================== wheel gift maintenance ====================

    /// All wheel gifts across carts, whatever their expiry state
    ///
    /// Expiry filtering happens in Rust against the caller's `now` so
    /// gifts without an expiry are never misclassified.
    pub async fn list_wheel_items(&self) -> RepoResult<Vec<CartLineItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE kind = $kind")
            .bind(("kind", ItemKind::WheelGift))
            .await?;
        let items: Vec<CartLineItem> = result.take(0)?;
        Ok(items)
    }

    pub async fn set_item_expiry(
        &self,
        cart_id: &str,
        item_key: &str,
        expires_at: Option<i64>,
    ) -> RepoResult<()> {
        let cart_id = cart_id.to_string();
        let item_key = item_key.to_string();
        self.base
            .db()
            .query("UPDATE cart_item SET expires_at = $expires_at WHERE cart_id = $cart_id AND item_key = $item_key")
            .bind(("expires_at", expires_at))
            .bind(("cart_id", cart_id))
            .bind(("item_key", item_key))
            .await?;
        Ok(())
    }
}

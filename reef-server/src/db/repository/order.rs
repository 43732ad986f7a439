//! Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Order, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "shop_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shop_order ORDER BY created_at DESC")
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let order_id = order_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shop_order WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Find the order created for a payment-provider session
    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Option<Order>> {
        let session_id = session_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shop_order WHERE provider_session_id = $session_id LIMIT 1")
            .bind(("session_id", session_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()> {
        let order_id = order_id.to_string();
        self.base
            .db()
            .query("UPDATE shop_order SET status = $status WHERE order_id = $order_id")
            .bind(("status", status))
            .bind(("order_id", order_id))
            .await?;
        Ok(())
    }
}

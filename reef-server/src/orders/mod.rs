//! Order management and dispute threads
//!
//! Orders are snapshotted by the checkout reconciler; this service
//! exposes them for the account/support pages, enforces the forward-only
//! status transitions and owns the per-order dispute ("litige") thread.

use crate::db::repository::{DisputeRepository, OrderRepository};
use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Dispute, DisputeMessage, DisputeStatus, Order, OrderStatus, SenderRole,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    disputes: DisputeRepository,
}

/// Dispute thread as served to the support page
#[derive(Debug, Clone, serde::Serialize)]
pub struct DisputeThread {
    pub dispute: Dispute,
    pub messages: Vec<DisputeMessage>,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            disputes: DisputeRepository::new(db),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))
    }

    /// Move an order along the fulfilment path
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> AppResult<Order> {
        let order = self.get(order_id).await?;
        if !order.status.can_transition_to(status) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move order from {:?} to {:?}", order.status, status),
            ));
        }
        self.orders.set_status(order_id, status).await?;
        Ok(Order { status, ..order })
    }

    // ==================== disputes ====================

    /// Dispute thread of an order, opened on first access
    pub async fn dispute_thread(&self, order_id: &str) -> AppResult<DisputeThread> {
        self.get(order_id).await?;
        let dispute = self.disputes.get_or_open(order_id).await?;
        let messages = self.disputes.messages(order_id).await?;
        Ok(DisputeThread { dispute, messages })
    }

    /// Append a message to the thread
    ///
    /// Client messages are rejected once the dispute is closed; the
    /// support side may still write.
    pub async fn post_message(
        &self,
        order_id: &str,
        sender: SenderRole,
        body: &str,
    ) -> AppResult<DisputeMessage> {
        self.get(order_id).await?;
        let dispute = self.disputes.get_or_open(order_id).await?;
        if dispute.status == DisputeStatus::Closed && sender == SenderRole::Client {
            return Err(AppError::new(ErrorCode::DisputeClosed));
        }

        let message = DisputeMessage {
            order_id: order_id.to_string(),
            sender,
            body: body.to_string(),
            sent_at: Utc::now().timestamp_millis(),
        };
        Ok(self.disputes.append_message(message).await?)
    }

    /// Close the dispute; closing twice is a no-op
    pub async fn close_dispute(&self, order_id: &str) -> AppResult<Dispute> {
        self.get(order_id).await?;
        self.disputes.get_or_open(order_id).await?;
        self.disputes.close(order_id).await?;
        self.dispute_thread(order_id).await.map(|t| t.dispute)
    }
}

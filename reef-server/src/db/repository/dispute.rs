//! Dispute Repository
//!
//! One `dispute` row per order plus an append-only `dispute_message`
//! collection ordered by `sent_at`.

use super::{BaseRepository, RepoError, RepoResult};
use chrono::Utc;
use shared::models::{Dispute, DisputeMessage, DisputeStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dispute";
const MESSAGE_TABLE: &str = "dispute_message";

#[derive(Clone)]
pub struct DisputeRepository {
    base: BaseRepository,
}

impl DisputeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find(&self, order_id: &str) -> RepoResult<Option<Dispute>> {
        let order_id = order_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dispute WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id))
            .await?;
        let disputes: Vec<Dispute> = result.take(0)?;
        Ok(disputes.into_iter().next())
    }

    /// Fetch the dispute for an order, opening it on first access
    pub async fn get_or_open(&self, order_id: &str) -> RepoResult<Dispute> {
        if let Some(dispute) = self.find(order_id).await? {
            return Ok(dispute);
        }
        let dispute = Dispute {
            order_id: order_id.to_string(),
            status: DisputeStatus::Open,
            opened_at: Utc::now().timestamp_millis(),
        };
        let created: Option<Dispute> = self.base.db().create(TABLE).content(dispute).await?;
        created.ok_or_else(|| RepoError::Database("Failed to open dispute".to_string()))
    }

    /// Close the dispute; closing an already-closed dispute is a no-op
    pub async fn close(&self, order_id: &str) -> RepoResult<()> {
        let order_id = order_id.to_string();
        self.base
            .db()
            .query("UPDATE dispute SET status = $status WHERE order_id = $order_id")
            .bind(("status", DisputeStatus::Closed))
            .bind(("order_id", order_id))
            .await?;
        Ok(())
    }

    pub async fn append_message(&self, message: DisputeMessage) -> RepoResult<DisputeMessage> {
        let created: Option<DisputeMessage> =
            self.base.db().create(MESSAGE_TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to append dispute message".to_string()))
    }

    pub async fn messages(&self, order_id: &str) -> RepoResult<Vec<DisputeMessage>> {
        let order_id = order_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dispute_message WHERE order_id = $order_id ORDER BY sent_at ASC")
            .bind(("order_id", order_id))
            .await?;
        let messages: Vec<DisputeMessage> = result.take(0)?;
        Ok(messages)
    }
}

//! Cart Threshold Repository

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::CartThreshold;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "cart_threshold";

#[derive(Clone)]
pub struct ThresholdRepository {
    base: BaseRepository,
}

impl ThresholdRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All thresholds, ascending by unlock value
    pub async fn find_all_ordered(&self) -> RepoResult<Vec<CartThreshold>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_threshold ORDER BY value ASC")
            .await?;
        let thresholds: Vec<CartThreshold> = result.take(0)?;
        Ok(thresholds)
    }

    pub async fn find_by_id(&self, threshold_id: &str) -> RepoResult<Option<CartThreshold>> {
        let threshold_id = threshold_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_threshold WHERE threshold_id = $threshold_id LIMIT 1")
            .bind(("threshold_id", threshold_id))
            .await?;
        let thresholds: Vec<CartThreshold> = result.take(0)?;
        Ok(thresholds.into_iter().next())
    }

    pub async fn create(&self, data: CartThreshold) -> RepoResult<CartThreshold> {
        if self.find_by_id(&data.threshold_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Threshold '{}' already exists",
                data.threshold_id
            )));
        }
        let created: Option<CartThreshold> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create threshold".to_string()))
    }
}

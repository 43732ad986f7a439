//! Promotion Repository

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::Promotion;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "promotion";

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a promotion by code (case-insensitive; codes are stored upper-cased)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Promotion>> {
        let code = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM promotion WHERE code = $code LIMIT 1")
            .bind(("code", code))
            .await?;
        let promotions: Vec<Promotion> = result.take(0)?;
        Ok(promotions.into_iter().next())
    }

    /// Create a new promotion; the code is canonicalized to upper case
    pub async fn create(&self, mut data: Promotion) -> RepoResult<Promotion> {
        data.code = data.code.trim().to_uppercase();
        if self.find_by_code(&data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Promotion '{}' already exists",
                data.code
            )));
        }
        let created: Option<Promotion> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create promotion".to_string()))
    }

    /// Count one redemption (called at order confirmation, not at apply time)
    pub async fn increment_usage(&self, code: &str) -> RepoResult<()> {
        let code = code.trim().to_uppercase();
        self.base
            .db()
            .query("UPDATE promotion SET usage_count += 1 WHERE code = $code")
            .bind(("code", code))
            .await?;
        Ok(())
    }
}

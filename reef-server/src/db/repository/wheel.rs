//! Wheel Settings Repository (single-row collection)

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::WheelGiftSettings;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "wheel_settings";

#[derive(Clone)]
pub struct WheelSettingsRepository {
    base: BaseRepository,
}

impl WheelSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Current settings; falls back to the default delay when unset
    pub async fn get(&self) -> RepoResult<WheelGiftSettings> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM wheel_settings LIMIT 1")
            .await?;
        let rows: Vec<WheelGiftSettings> = result.take(0)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Replace the settings row
    pub async fn set(&self, settings: WheelGiftSettings) -> RepoResult<WheelGiftSettings> {
        if settings.participation_delay_hours <= 0 {
            return Err(RepoError::Validation(
                "participation_delay_hours must be positive".to_string(),
            ));
        }
        self.base.db().query("DELETE wheel_settings").await?;
        let created: Option<WheelGiftSettings> =
            self.base.db().create(TABLE).content(settings).await?;
        created.ok_or_else(|| RepoError::Database("Failed to store wheel settings".to_string()))
    }
}

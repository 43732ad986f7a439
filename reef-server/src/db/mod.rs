//! Database Module
//!
//! Embedded SurrealDB storage behind a repository layer. Collections are
//! schemaless and created on first write; all access goes through the
//! repositories in [`repository`].

pub mod repository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "recif";
const DATABASE: &str = "shop";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {}", db_path);
        Ok(Self { db })
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ProductRepository;
    use shared::models::Product;

    #[tokio::test]
    async fn test_on_disk_database_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recif.db");
        let service = DbService::new(&path.to_string_lossy()).await.unwrap();

        let repo = ProductRepository::new(service.db.clone());
        repo.create(Product {
            product_id: "sable".to_string(),
            title: "Sable de corail 10kg".to_string(),
            image_url: None,
            price: 18.90,
            payment_ref: "price_sable".to_string(),
            discount_percentage: None,
            discounted_payment_ref: None,
            stock: None,
            variants: vec![],
        })
        .await
        .unwrap();

        let found = repo.find_by_id("sable").await.unwrap().unwrap();
        assert_eq!(found.price, 18.90);
    }
}

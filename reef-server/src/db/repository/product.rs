//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::Product;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY title ASC")
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, product_id: &str) -> RepoResult<Option<Product>> {
        let product_id = product_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE product_id = $product_id LIMIT 1")
            .bind(("product_id", product_id))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    pub async fn create(&self, data: Product) -> RepoResult<Product> {
        if self.find_by_id(&data.product_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                data.product_id
            )));
        }
        let created: Option<Product> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }
}

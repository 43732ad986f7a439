//! Repository Module
//!
//! One repository per collection. Rows are addressed by business keys
//! (`cart_id`, `item_key`, promotion `code`, ...) with point lookups and
//! simple equality/ordering filters; no multi-row transactions.

pub mod cart;
pub mod dispute;
pub mod order;
pub mod product;
pub mod promotion;
pub mod threshold;
pub mod wheel;

// Re-exports
pub use cart::CartRepository;
pub use dispute::DisputeRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use promotion::PromotionRepository;
pub use threshold::ThresholdRepository;
pub use wheel::WheelSettingsRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

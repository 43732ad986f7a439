//! Promotion code validation and discount math

use crate::cart::money::round2;
use crate::db::repository::{PromotionRepository, RepoError};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{AppliedPromotion, PromotionKind};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Promotion validation failures, in the order they are checked
#[derive(Debug, Error)]
pub enum PromoError {
    #[error("This promotion code is not valid")]
    Unknown,

    #[error("This promotion code has expired")]
    Expired,

    #[error("This promotion code has reached its usage limit")]
    Exhausted,

    #[error("A minimum order of {minimum:.2} € is required for this code")]
    MinimumNotMet { minimum: f64 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<PromoError> for AppError {
    fn from(err: PromoError) -> Self {
        let message = err.to_string();
        match err {
            PromoError::Unknown => AppError::with_message(ErrorCode::PromoUnknown, message),
            PromoError::Expired => AppError::with_message(ErrorCode::PromoExpired, message),
            PromoError::Exhausted => AppError::with_message(ErrorCode::PromoExhausted, message),
            PromoError::MinimumNotMet { minimum } => {
                AppError::with_message(ErrorCode::PromoMinimumNotMet, message)
                    .with_detail("minimum", minimum)
            }
            PromoError::Repo(repo) => repo.into(),
        }
    }
}

/// Discount for a promotion against a payable subtotal
///
/// Percentage: `round2(subtotal * value / 100)`; fixed: `min(value,
/// subtotal)`. Never negative, never above the subtotal.
pub fn discount_amount(promotion: &AppliedPromotion, payable_subtotal: Decimal) -> Decimal {
    if payable_subtotal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let value = crate::cart::money::to_decimal(promotion.value);
    let raw = match promotion.kind {
        PromotionKind::Percentage => round2(payable_subtotal * value / Decimal::ONE_HUNDRED),
        PromotionKind::Fixed => value,
    };
    raw.clamp(Decimal::ZERO, payable_subtotal)
}

#[derive(Clone)]
pub struct PromotionEngine {
    promotions: PromotionRepository,
}

impl PromotionEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            promotions: PromotionRepository::new(db),
        }
    }

    /// Validate `code` against the current payable subtotal
    ///
    /// Checks run in a fixed order (existence/activity, expiry, usage,
    /// minimum order) and the first failure wins; there is no partial
    /// application.
    pub async fn validate(
        &self,
        code: &str,
        payable_subtotal: Decimal,
        now: i64,
    ) -> Result<AppliedPromotion, PromoError> {
        let promotion = self
            .promotions
            .find_by_code(code)
            .await?
            .filter(|p| p.is_active)
            .ok_or(PromoError::Unknown)?;

        if promotion.expires_at.is_some_and(|expires_at| now > expires_at) {
            return Err(PromoError::Expired);
        }

        if promotion
            .usage_limit
            .is_some_and(|limit| promotion.usage_count >= limit)
        {
            return Err(PromoError::Exhausted);
        }

        if let Some(minimum) = promotion.min_order_amount {
            if payable_subtotal < crate::cart::money::to_decimal(minimum) {
                return Err(PromoError::MinimumNotMet { minimum });
            }
        }

        Ok(AppliedPromotion::from(&promotion))
    }

    /// Count one redemption (called at order confirmation)
    pub async fn record_usage(&self, code: &str) -> Result<(), PromoError> {
        self.promotions.increment_usage(code).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::money::{to_decimal, to_f64};
    use crate::db::DbService;
    use shared::models::Promotion;

    fn percentage(code: &str, value: f64) -> AppliedPromotion {
        AppliedPromotion {
            code: code.to_string(),
            kind: PromotionKind::Percentage,
            value,
        }
    }

    fn fixed(code: &str, value: f64) -> AppliedPromotion {
        AppliedPromotion {
            code: code.to_string(),
            kind: PromotionKind::Fixed,
            value,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let d = discount_amount(&percentage("SAVE10", 10.0), to_decimal(50.0));
        assert_eq!(to_f64(d), 5.0);
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        // 10% of 25.25 = 2.525 -> 2.53
        let d = discount_amount(&percentage("SAVE10", 10.0), to_decimal(25.25));
        assert_eq!(to_f64(d), 2.53);
    }

    #[test]
    fn test_fixed_discount_floors_at_subtotal() {
        let d = discount_amount(&fixed("MOINS15", 15.0), to_decimal(10.0));
        assert_eq!(to_f64(d), 10.0);
    }

    #[test]
    fn test_discount_on_empty_subtotal_is_zero() {
        assert_eq!(
            discount_amount(&percentage("SAVE10", 10.0), Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(
            discount_amount(&fixed("MOINS15", 15.0), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_recompute_follows_subtotal() {
        // The same promotion derives different amounts from different
        // subtotals, so removing items can never keep a stale discount.
        let promo = percentage("SAVE10", 10.0);
        assert_eq!(to_f64(discount_amount(&promo, to_decimal(50.0))), 5.0);
        assert_eq!(to_f64(discount_amount(&promo, to_decimal(25.0))), 2.5);
    }

    async fn engine_with(promotion: Promotion) -> PromotionEngine {
        let db = DbService::memory().await.unwrap();
        PromotionRepository::new(db.db.clone())
            .create(promotion)
            .await
            .unwrap();
        PromotionEngine::new(db.db)
    }

    fn base_promotion() -> Promotion {
        Promotion {
            code: "SAVE10".to_string(),
            kind: PromotionKind::Percentage,
            value: 10.0,
            is_active: true,
            expires_at: None,
            usage_limit: None,
            usage_count: 0,
            min_order_amount: None,
        }
    }

    #[tokio::test]
    async fn test_validate_unknown_code() {
        let engine = engine_with(base_promotion()).await;
        let err = engine
            .validate("NOPE", to_decimal(50.0), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Unknown));
    }

    #[tokio::test]
    async fn test_validate_is_case_insensitive() {
        let engine = engine_with(base_promotion()).await;
        let applied = engine.validate("save10", to_decimal(50.0), 0).await.unwrap();
        assert_eq!(applied.code, "SAVE10");
    }

    #[tokio::test]
    async fn test_validate_inactive_code_is_unknown() {
        let mut promotion = base_promotion();
        promotion.is_active = false;
        let engine = engine_with(promotion).await;
        let err = engine
            .validate("SAVE10", to_decimal(50.0), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Unknown));
    }

    #[tokio::test]
    async fn test_validate_expired_code() {
        let mut promotion = base_promotion();
        promotion.expires_at = Some(1_000);
        let engine = engine_with(promotion).await;
        let err = engine
            .validate("SAVE10", to_decimal(50.0), 2_000)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Expired));
    }

    #[tokio::test]
    async fn test_validate_exhausted_code() {
        let mut promotion = base_promotion();
        promotion.usage_limit = Some(3);
        promotion.usage_count = 3;
        let engine = engine_with(promotion).await;
        let err = engine
            .validate("SAVE10", to_decimal(50.0), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Exhausted));
    }

    #[tokio::test]
    async fn test_validate_minimum_not_met() {
        let mut promotion = base_promotion();
        promotion.min_order_amount = Some(40.0);
        let engine = engine_with(promotion).await;
        let err = engine
            .validate("SAVE10", to_decimal(30.0), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::MinimumNotMet { .. }));

        // Meets the minimum exactly
        engine.validate("SAVE10", to_decimal(40.0), 0).await.unwrap();
    }

    #[tokio::test]
    async fn test_expiry_checked_before_usage() {
        // Validation order: expired wins over exhausted.
        let mut promotion = base_promotion();
        promotion.expires_at = Some(1_000);
        promotion.usage_limit = Some(1);
        promotion.usage_count = 1;
        let engine = engine_with(promotion).await;
        let err = engine
            .validate("SAVE10", to_decimal(50.0), 2_000)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Expired));
    }

    #[tokio::test]
    async fn test_record_usage_increments() {
        let engine = engine_with(base_promotion()).await;
        engine.record_usage("SAVE10").await.unwrap();
        engine.record_usage("SAVE10").await.unwrap();
        let stored = engine
            .promotions
            .find_by_code("SAVE10")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.usage_count, 2);
    }
}

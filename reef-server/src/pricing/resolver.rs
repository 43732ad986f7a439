//! Price resolution against the product collection

use crate::cart::money::{discounted_unit_price, to_decimal, to_f64};
use crate::db::repository::{ProductRepository, RepoError, RepoResult};
use shared::models::Product;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Effective price for a product/variant at resolution time
#[derive(Debug, Clone)]
pub struct ResolvedPrice {
    /// Effective unit price, discount already applied
    pub unit_price: f64,
    /// Pre-discount reference price, present only when a discount is active
    pub original_price: Option<f64>,
    pub discount_percentage: Option<u8>,
    /// Payment reference to submit: discounted one when a discount is
    /// active, base one otherwise
    pub payment_ref: String,
    pub stock: Option<i32>,
    pub title: String,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct PriceResolver {
    products: ProductRepository,
}

impl PriceResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    /// Resolve the currently effective price of `product_id` (+ variant)
    ///
    /// Variant fields override product-level fields one by one. Fails
    /// with `NotFound` when the product or the named variant does not
    /// exist, which is a blocking error at checkout time.
    pub async fn resolve(
        &self,
        product_id: &str,
        variant: Option<&str>,
    ) -> RepoResult<ResolvedPrice> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", product_id)))?;

        Self::resolve_in(&product, variant, product_id)
    }

    fn resolve_in(
        product: &Product,
        variant: Option<&str>,
        product_id: &str,
    ) -> RepoResult<ResolvedPrice> {
        let (base_price, payment_ref, discount_percentage, discounted_payment_ref, stock) =
            match variant {
                Some(name) => {
                    let v = product.variant(name).ok_or_else(|| {
                        RepoError::NotFound(format!(
                            "Variant '{}' of product {} not found",
                            name, product_id
                        ))
                    })?;
                    // A discounted payment reference encodes the price it
                    // discounts. A variant that overrides its pricing must
                    // therefore carry its own discount pair; inheriting
                    // the product's would charge the base-product price.
                    let has_own_pricing = v.price.is_some() || v.payment_ref.is_some();
                    let (discount_percentage, discounted_payment_ref) = if has_own_pricing {
                        (v.discount_percentage, v.discounted_payment_ref.clone())
                    } else {
                        (
                            v.discount_percentage.or(product.discount_percentage),
                            v.discounted_payment_ref
                                .clone()
                                .or_else(|| product.discounted_payment_ref.clone()),
                        )
                    };
                    (
                        v.price.unwrap_or(product.price),
                        v.payment_ref
                            .clone()
                            .unwrap_or_else(|| product.payment_ref.clone()),
                        discount_percentage,
                        discounted_payment_ref,
                        v.stock.or(product.stock),
                    )
                }
                None => (
                    product.price,
                    product.payment_ref.clone(),
                    product.discount_percentage,
                    product.discounted_payment_ref.clone(),
                    product.stock,
                ),
            };

        // A discount is only effective when the provider knows the
        // discounted price point; otherwise the base reference is kept.
        let active_discount = match (discount_percentage, &discounted_payment_ref) {
            (Some(pct), Some(_)) if pct > 0 => Some(pct),
            _ => None,
        };

        match active_discount {
            Some(pct) => Ok(ResolvedPrice {
                unit_price: to_f64(discounted_unit_price(to_decimal(base_price), pct)),
                original_price: Some(base_price),
                discount_percentage: Some(pct),
                payment_ref: discounted_payment_ref
                    .unwrap_or_else(|| payment_ref.clone()),
                stock,
                title: product.title.clone(),
                image_url: product.image_url.clone(),
            }),
            None => Ok(ResolvedPrice {
                unit_price: base_price,
                original_price: None,
                discount_percentage: None,
                payment_ref,
                stock,
                title: product.title.clone(),
                image_url: product.image_url.clone(),
            }),
        }
    }
}

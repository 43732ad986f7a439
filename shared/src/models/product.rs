//! Product catalog models

use serde::{Deserialize, Serialize};

/// Variant-level price configuration
///
/// Every field except `name` falls back to the product-level value when
/// absent, so a variant only stores what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Pipe-delimited `name:value` pairs ("Taille:M|Couleur:Bleu")
    pub name: String,
    pub price: Option<f64>,
    pub payment_ref: Option<String>,
    pub discount_percentage: Option<u8>,
    pub discounted_payment_ref: Option<String>,
    pub stock: Option<i32>,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Base unit price
    pub price: f64,
    /// Payment provider reference for the base price
    pub payment_ref: String,
    /// Active discount percentage (0–100)
    pub discount_percentage: Option<u8>,
    /// Payment provider reference for the discounted price
    pub discounted_payment_ref: Option<String>,
    /// Remaining stock; None = not tracked
    pub stock: Option<i32>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Find a variant by its exact name
    pub fn variant(&self, name: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

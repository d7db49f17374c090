//! # Catalog Setup
//!
//! Builds the store the demo sells from: either the built-in catalog or a
//! JSON catalog file.
//!
//! ## Catalog File Format
//! ```json
//! {
//!   "promotions": [
//!     { "name": "30% off!", "rule": { "type": "percentage_discount", "percent": 30 } }
//!   ],
//!   "products": [
//!     { "name": "MacBook Air M2", "price_cents": 145000, "quantity": 100,
//!       "promotion": "30% off!" },
//!     { "name": "Shipping", "price_cents": 1000, "quantity": 250,
//!       "kind": { "type": "limited", "purchase_limit": 1 } },
//!     { "name": "Windows License", "price_cents": 12500,
//!       "kind": { "type": "non_stocked" } }
//!   ]
//! }
//! ```
//!
//! Promotions are created once and shared by every product naming them.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use storefront_core::{
    CoreError, Money, PricingRule, Product, ProductKind, Promotion, SharedPromotion, Store,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub promotions: Vec<PromotionSeed>,
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromotionSeed {
    pub name: String,
    pub rule: PricingRule,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub price_cents: i64,
    /// Ignored for non-stocked products and add-ons.
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "standard_kind")]
    pub kind: ProductKind,
    /// Name of a promotion declared in the same file.
    #[serde(default)]
    pub promotion: Option<String>,
}

fn standard_kind() -> ProductKind {
    ProductKind::Standard
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product {product} refers to unknown promotion {promotion}")]
    UnknownPromotion { product: String, promotion: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Reads and builds a catalog file.
pub fn load_catalog(path: &Path) -> Result<Store, CatalogError> {
    let raw = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)?;
    build_store(file)
}

/// Turns parsed seeds into a store, validating every product and promotion.
pub fn build_store(file: CatalogFile) -> Result<Store, CatalogError> {
    let mut promotions: HashMap<String, SharedPromotion> = HashMap::new();
    for seed in file.promotions {
        let promotion = Promotion::new(seed.name.clone(), seed.rule)?.shared();
        promotions.insert(seed.name, promotion);
    }

    let mut products = Vec::with_capacity(file.products.len());
    for seed in file.products {
        let price = Money::from_cents(seed.price_cents);
        let mut product = match seed.kind {
            ProductKind::Standard => Product::new(seed.name.clone(), price, seed.quantity)?,
            ProductKind::NonStocked => Product::non_stocked(seed.name.clone(), price)?,
            ProductKind::Limited { purchase_limit } => {
                Product::limited(seed.name.clone(), price, seed.quantity, purchase_limit)?
            }
            ProductKind::AddOn => Product::add_on(seed.name.clone(), price)?,
        };

        if let Some(promotion_name) = seed.promotion {
            let promotion = promotions.get(&promotion_name).ok_or_else(|| {
                CatalogError::UnknownPromotion {
                    product: seed.name.clone(),
                    promotion: promotion_name.clone(),
                }
            })?;
            product.set_promotion(promotion.clone());
        }
        products.push(product);
    }

    Ok(Store::new(products))
}

/// The store used when no catalog file is configured.
pub fn builtin_catalog() -> Result<Store, CoreError> {
    let second_half_price = Promotion::second_item_half_price("Second Half price!")?.shared();
    let third_one_free = Promotion::buy_two_get_one_free("Third One Free!")?.shared();
    let thirty_percent = Promotion::percentage_discount("30% off!", 30)?.shared();

    let products = vec![
        Product::new("MacBook Air M2", Money::from_major_minor(1450, 0), 100)?
            .with_promotion(second_half_price),
        Product::new("Bose QuietComfort Earbuds", Money::from_major_minor(250, 0), 500)?
            .with_promotion(third_one_free),
        Product::new("Google Pixel 7", Money::from_major_minor(500, 0), 250)?,
        Product::non_stocked("Windows License", Money::from_major_minor(125, 0))?
            .with_promotion(thirty_percent),
        Product::limited("Shipping", Money::from_major_minor(10, 0), 250, 1)?,
        Product::add_on("Extended Warranty", Money::from_major_minor(30, 0))?,
    ];

    Ok(Store::new(products))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "promotions": [
            { "name": "30% off!", "rule": { "type": "percentage_discount", "percent": 30 } }
        ],
        "products": [
            { "name": "MacBook Air M2", "price_cents": 145000, "quantity": 100, "promotion": "30% off!" },
            { "name": "Shipping", "price_cents": 1000, "quantity": 250,
              "kind": { "type": "limited", "purchase_limit": 1 } },
            { "name": "Windows License", "price_cents": 12500, "kind": { "type": "non_stocked" } },
            { "name": "Extended Warranty", "price_cents": 3000, "kind": { "type": "add_on" } }
        ]
    }"#;

    #[test]
    fn test_builtin_catalog() {
        let store = builtin_catalog().unwrap();
        assert_eq!(store.products().len(), 6);
        assert_eq!(store.get_all_products().len(), 6);
        assert_eq!(store.get_total_quantity(), 100 + 500 + 250 + 250 + 1);

        let promoted = store
            .products()
            .iter()
            .filter(|p| p.promotion().is_some())
            .count();
        assert_eq!(promoted, 3);
    }

    #[test]
    fn test_build_store_from_json() {
        let file: CatalogFile = serde_json::from_str(SAMPLE).unwrap();
        let store = build_store(file).unwrap();

        let names: Vec<&str> = store.products().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["MacBook Air M2", "Shipping", "Windows License", "Extended Warranty"]
        );
        let macbook = &store.products()[0];
        assert_eq!(macbook.promotion().unwrap().name(), "30% off!");
        assert_eq!(store.products()[1].purchase_limit(), Some(1));
        assert_eq!(store.products()[2].quantity(), 0);
        assert_eq!(store.products()[3].quantity(), 1);
    }

    #[test]
    fn test_unknown_promotion() {
        let file: CatalogFile = serde_json::from_str(
            r#"{ "products": [ { "name": "Pixel", "price_cents": 100, "quantity": 1, "promotion": "Nope" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            build_store(file),
            Err(CatalogError::UnknownPromotion { .. })
        ));
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let file: CatalogFile = serde_json::from_str(
            r#"{ "products": [ { "name": "", "price_cents": 100, "quantity": 1 } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            build_store(file),
            Err(CatalogError::Core(CoreError::InvalidConfiguration(_)))
        ));

        let file: CatalogFile = serde_json::from_str(
            r#"{ "promotions": [ { "name": "Too much", "rule": { "type": "percentage_discount", "percent": 150 } } ],
                 "products": [] }"#,
        )
        .unwrap();
        assert!(build_store(file).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_catalog(Path::new("/definitely/not/here.json")),
            Err(CatalogError::Io(_))
        ));
    }
}

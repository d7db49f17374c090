//! # Products
//!
//! The catalog entity and its four purchase behaviors.
//!
//! ## Variant Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Variants                                  │
//! │                                                                         │
//! │  Kind         Stock check   Limit check     Stock mutation  Deactivates │
//! │  ───────────  ────────────  ──────────────  ──────────────  ─────────── │
//! │  Standard     q ≤ stock     -               stock -= q      at 0        │
//! │  Limited      q ≤ stock     q ≤ limit (1st) stock -= q      at 0        │
//! │  NonStocked   -             -               -               never       │
//! │  AddOn        -             q == 1          -               never       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchase Flow
//! ```text
//! buy(q)
//!   │
//!   ├── check_purchase(q)   active? → q > 0? → limit? → stock?
//!   │        (first failure wins; nothing is mutated)
//!   │
//!   ├── price_for(q)        promotion.apply(price, q) or price × q
//!   │
//!   └── commit_purchase(q)  stock -= q, deactivate at 0
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::SharedPromotion;
use crate::validation::{
    validate_price, validate_product_name, validate_purchase_limit, validate_stock_quantity,
};

/// Purchase limit every add-on carries.
pub const ADD_ON_LIMIT: i64 = 1;

// =============================================================================
// Product Id
// =============================================================================

/// Stable identity of a catalog product (UUID v4).
///
/// Order lines and the cart preview refer to products by id, so two products
/// with the same name and price are still distinct catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Stock-tracked; deactivates when stock reaches zero.
    Standard,
    /// Digital goods, licenses: no stock, never sells out.
    NonStocked,
    /// Stock-tracked with a per-purchase cap.
    Limited { purchase_limit: i64 },
    /// Shipping, warranty: one per order, flat price.
    AddOn,
}

impl ProductKind {
    pub fn tracks_stock(&self) -> bool {
        matches!(self, ProductKind::Standard | ProductKind::Limited { .. })
    }

    pub fn purchase_limit(&self) -> Option<i64> {
        match self {
            ProductKind::Limited { purchase_limit } => Some(*purchase_limit),
            ProductKind::AddOn => Some(ADD_ON_LIMIT),
            ProductKind::Standard | ProductKind::NonStocked => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Fields are private: stock and activation only change through
/// [`Product::buy`], [`Product::set_quantity`], [`Product::activate`] and
/// [`Product::deactivate`], which keep the invariants intact.
///
/// ## Invariants
/// - `name` is non-empty and never changes
/// - `price >= 0`, `quantity >= 0`
/// - NonStocked always reports quantity 0, AddOn always reports quantity 1
/// - An inactive product cannot be bought
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    quantity: i64,
    active: bool,
    kind: ProductKind,
    promotion: Option<SharedPromotion>,
}

impl Product {
    /// Creates a standard stock-tracked product.
    ///
    /// ```rust
    /// use storefront_core::{Money, Product};
    ///
    /// let mut macbook = Product::new("MacBook Air M2", Money::from_major_minor(1450, 0), 100).unwrap();
    /// let charged = macbook.buy(5).unwrap();
    /// assert_eq!(charged, Money::from_major_minor(7250, 0));
    /// assert_eq!(macbook.quantity(), 95);
    ///
    /// assert!(Product::new("", Money::from_cents(100), 1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> CoreResult<Self> {
        Product::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Creates a product without stock (quantity always reads 0).
    pub fn non_stocked(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        Product::build(name.into(), price, 0, ProductKind::NonStocked)
    }

    /// Creates a stock-tracked product capped at `purchase_limit` per purchase.
    pub fn limited(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        purchase_limit: i64,
    ) -> CoreResult<Self> {
        validate_purchase_limit(purchase_limit)?;
        Product::build(
            name.into(),
            price,
            quantity,
            ProductKind::Limited { purchase_limit },
        )
    }

    /// Creates a one-per-order add-on charged at a flat price.
    pub fn add_on(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        Product::build(name.into(), price, ADD_ON_LIMIT, ProductKind::AddOn)
    }

    fn build(name: String, price: Money, quantity: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock_quantity(quantity)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity,
            active: true,
            kind,
            promotion: None,
        })
    }

    /// Attaches a promotion while building a catalog.
    pub fn with_promotion(mut self, promotion: SharedPromotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn promotion(&self) -> Option<&SharedPromotion> {
        self.promotion.as_ref()
    }

    pub fn purchase_limit(&self) -> Option<i64> {
        self.kind.purchase_limit()
    }

    pub fn tracks_stock(&self) -> bool {
        self.kind.tracks_stock()
    }

    // -------------------------------------------------------------------------
    // State Changes
    // -------------------------------------------------------------------------

    /// Replaces the stock level. Reaching zero deactivates the product;
    /// raising it again does not reactivate it.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if !self.tracks_stock() {
            return Err(CoreError::StockNotTracked {
                name: self.name.clone(),
            });
        }
        validate_stock_quantity(quantity)?;

        self.quantity = quantity;
        if self.quantity == 0 {
            self.deactivate();
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        if self.active {
            debug!(product = %self.name, "Product deactivated");
        }
        self.active = false;
    }

    pub fn set_promotion(&mut self, promotion: SharedPromotion) {
        self.promotion = Some(promotion);
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    // -------------------------------------------------------------------------
    // Purchase
    // -------------------------------------------------------------------------

    /// Checks whether `quantity` could be bought right now, without mutating
    /// anything. Checks run in order and the first failure wins:
    ///
    /// 1. active, else [`CoreError::InactiveProduct`]
    /// 2. `quantity > 0`, else [`CoreError::NonPositiveQuantity`]
    /// 3. purchase limit, else [`CoreError::PurchaseLimitExceeded`]
    /// 4. stock, else [`CoreError::InsufficientStock`]
    pub fn check_purchase(&self, quantity: i64) -> CoreResult<()> {
        if !self.active {
            return Err(CoreError::InactiveProduct {
                name: self.name.clone(),
            });
        }
        if quantity <= 0 {
            return Err(CoreError::NonPositiveQuantity {
                requested: quantity,
            });
        }

        match self.kind {
            ProductKind::Standard => self.check_stock(quantity),
            ProductKind::Limited { purchase_limit } => {
                self.check_limit(purchase_limit, quantity)?;
                self.check_stock(quantity)
            }
            ProductKind::NonStocked => Ok(()),
            ProductKind::AddOn => self.check_limit(ADD_ON_LIMIT, quantity),
        }
    }

    fn check_limit(&self, limit: i64, quantity: i64) -> CoreResult<()> {
        if quantity > limit {
            return Err(CoreError::PurchaseLimitExceeded {
                name: self.name.clone(),
                limit,
                requested: quantity,
            });
        }
        Ok(())
    }

    fn check_stock(&self, quantity: i64) -> CoreResult<()> {
        if quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }
        Ok(())
    }

    /// What `quantity` items would cost. Add-ons are always charged their
    /// flat price.
    pub fn price_for(&self, quantity: i64) -> CoreResult<Money> {
        if self.kind == ProductKind::AddOn {
            return Ok(self.price);
        }
        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, quantity),
            None => self
                .price
                .checked_multiply_quantity(quantity)
                .ok_or(CoreError::AmountOverflow),
        }
    }

    /// Applies an already checked purchase to stock.
    pub(crate) fn commit_purchase(&mut self, quantity: i64) {
        if !self.tracks_stock() {
            return;
        }
        self.quantity -= quantity;
        if self.quantity == 0 {
            self.deactivate();
        }
    }

    /// Buys `quantity` items and returns the amount charged.
    ///
    /// Either the whole purchase happens or nothing changes: every check and
    /// the price calculation run before stock is touched.
    pub fn buy(&mut self, quantity: i64) -> CoreResult<Money> {
        self.check_purchase(quantity)?;
        let charged = self.price_for(quantity)?;
        self.commit_purchase(quantity);
        Ok(charged)
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// One-line description, e.g.
    /// `MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: None`.
    pub fn show(&self) -> String {
        self.to_string()
    }

    /// Read-only projection for display layers.
    pub fn view(&self) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            active: self.active,
            kind: self.kind,
            promotion: self.promotion.as_ref().map(|p| p.name().to_string()),
            purchase_limit: self.purchase_limit(),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Price: {}, ", self.name, self.price)?;
        match self.kind {
            ProductKind::Standard => write!(f, "Quantity: {}", self.quantity)?,
            ProductKind::NonStocked => f.write_str("Quantity: Unlimited")?,
            ProductKind::Limited { purchase_limit } => write!(
                f,
                "Quantity: {}, Limited to {} per order!",
                self.quantity, purchase_limit
            )?,
            ProductKind::AddOn => f.write_str("Add-on, 1 per order")?,
        }
        match &self.promotion {
            Some(promotion) => write!(f, ", Promotion: {}", promotion),
            None => f.write_str(", Promotion: None"),
        }
    }
}

// =============================================================================
// Product View
// =============================================================================

/// The display fields a UI reads from a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[ts(as = "String")]
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub active: bool,
    pub kind: ProductKind,
    pub promotion: Option<String>,
    pub purchase_limit: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::promotion::Promotion;

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    fn macbook(quantity: i64) -> Product {
        Product::new("MacBook Air M2", dollars(1450), quantity).unwrap()
    }

    #[test]
    fn test_product_creation() {
        let product = macbook(100);
        assert_eq!(product.name(), "MacBook Air M2");
        assert_eq!(product.price(), dollars(1450));
        assert_eq!(product.quantity(), 100);
        assert!(product.is_active());
        assert!(product.promotion().is_none());
        assert_eq!(product.purchase_limit(), None);
    }

    #[test]
    fn test_zero_price_and_zero_stock_are_valid() {
        assert!(Product::new("Sticker", Money::zero(), 0).is_ok());
    }

    #[test]
    fn test_invalid_product_creation() {
        assert_eq!(
            Product::new("", dollars(1450), 100).unwrap_err(),
            CoreError::InvalidConfiguration(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(matches!(
            Product::new("MacBook Air M2", dollars(-10), 100),
            Err(CoreError::InvalidConfiguration(ValidationError::Negative { .. }))
        ));
        assert!(matches!(
            Product::new("MacBook Air M2", dollars(1450), -1),
            Err(CoreError::InvalidConfiguration(ValidationError::Negative { .. }))
        ));
        assert!(matches!(
            Product::limited("Shipping", dollars(10), 250, 0),
            Err(CoreError::InvalidConfiguration(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(macbook(1).id(), macbook(1).id());
    }

    #[test]
    fn test_buy_modifies_quantity() {
        let mut product = macbook(10);
        assert_eq!(product.buy(5).unwrap(), dollars(7250));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_buying_remaining_stock_deactivates() {
        let mut product = macbook(10);
        product.buy(10).unwrap();
        assert_eq!(product.quantity(), 0);
        assert!(!product.is_active());
    }

    #[test]
    fn test_set_quantity_zero_deactivates() {
        let mut product = macbook(10);
        product.set_quantity(0).unwrap();
        assert!(!product.is_active());

        // Restocking alone does not reactivate
        product.set_quantity(5).unwrap();
        assert!(!product.is_active());
        product.activate();
        assert!(product.buy(5).is_ok());
    }

    #[test]
    fn test_set_quantity_rejects_negative() {
        let mut product = macbook(10);
        assert!(product.set_quantity(-1).is_err());
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn test_buying_zero_quantity_fails() {
        let mut product = macbook(5);
        assert_eq!(
            product.buy(0),
            Err(CoreError::NonPositiveQuantity { requested: 0 })
        );
        assert!(product.buy(-2).is_err());
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_buying_more_than_available_fails() {
        let mut product = macbook(5);
        assert_eq!(
            product.buy(6),
            Err(CoreError::InsufficientStock {
                name: "MacBook Air M2".to_string(),
                available: 5,
                requested: 6,
            })
        );
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_inactive_product_cannot_be_bought() {
        let mut product = macbook(5);
        product.deactivate();
        // Inactive wins over the bad quantity
        assert!(matches!(
            product.buy(0),
            Err(CoreError::InactiveProduct { .. })
        ));
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_limited_product_rejects_over_limit_before_stock() {
        let mut shipping = Product::limited("Shipping", dollars(10), 250, 1).unwrap();
        assert_eq!(
            shipping.buy(2),
            Err(CoreError::PurchaseLimitExceeded {
                name: "Shipping".to_string(),
                limit: 1,
                requested: 2,
            })
        );
        // Over both limit and stock: limit is reported
        let mut scarce = Product::limited("Scarce", dollars(10), 1, 2).unwrap();
        assert!(matches!(
            scarce.buy(3),
            Err(CoreError::PurchaseLimitExceeded { .. })
        ));
        assert!(matches!(
            scarce.buy(2),
            Err(CoreError::InsufficientStock { .. })
        ));

        assert_eq!(shipping.buy(1).unwrap(), dollars(10));
        assert_eq!(shipping.quantity(), 249);
    }

    #[test]
    fn test_limited_product_sells_out_in_limit_sized_purchases() {
        let mut shipping = Product::limited("Shipping", dollars(10), 6, 2).unwrap();
        for _ in 0..3 {
            assert_eq!(shipping.buy(2).unwrap(), dollars(20));
        }
        assert_eq!(shipping.quantity(), 0);
        assert!(!shipping.is_active());
        assert_eq!(
            shipping.buy(1),
            Err(CoreError::InactiveProduct {
                name: "Shipping".to_string()
            })
        );
        assert_eq!(shipping.quantity(), 0);
    }

    #[test]
    fn test_any_non_empty_name_is_accepted() {
        assert!(Product::new("A".repeat(201), Money::from_cents(1), 1).is_ok());
        assert!(Product::new("   ", Money::from_cents(1), 1).is_ok());
        assert!(Product::add_on(" ", Money::zero()).is_ok());
    }

    #[test]
    fn test_huge_non_stocked_purchase_overflows_without_panicking() {
        let mut license = Product::non_stocked("Windows License", dollars(125)).unwrap();
        assert_eq!(license.buy(i64::MAX / 1000), Err(CoreError::AmountOverflow));
        assert_eq!(license.price_for(i64::MAX), Err(CoreError::AmountOverflow));
        assert!(license.is_active());
        assert_eq!(license.buy(2).unwrap(), dollars(250));

        let thirty_off = Promotion::percentage_discount("30% off!", 30).unwrap().shared();
        license.set_promotion(thirty_off);
        assert_eq!(license.buy(i64::MAX / 1000), Err(CoreError::AmountOverflow));
    }

    #[test]
    fn test_non_stocked_never_changes_quantity() {
        let mut license = Product::non_stocked("Windows License", dollars(125)).unwrap();
        assert_eq!(license.buy(1000).unwrap(), dollars(125_000));
        assert_eq!(license.buy(1).unwrap(), dollars(125));
        assert_eq!(license.quantity(), 0);
        assert!(license.is_active());
        assert!(matches!(
            license.set_quantity(10),
            Err(CoreError::StockNotTracked { .. })
        ));
    }

    #[test]
    fn test_add_on_is_one_at_flat_price() {
        let warranty = Promotion::percentage_discount("Half off", 50).unwrap().shared();
        let mut add_on = Product::add_on("Extended Warranty", dollars(30))
            .unwrap()
            .with_promotion(warranty);
        assert_eq!(add_on.quantity(), 1);
        assert_eq!(add_on.purchase_limit(), Some(1));
        assert!(matches!(
            add_on.buy(2),
            Err(CoreError::PurchaseLimitExceeded { limit: 1, .. })
        ));
        assert_eq!(add_on.buy(1).unwrap(), dollars(30));
        assert_eq!(add_on.buy(1).unwrap(), dollars(30));
        assert_eq!(add_on.quantity(), 1);
        assert!(add_on.is_active());
    }

    #[test]
    fn test_promotion_pricing_through_buy() {
        let twenty = Promotion::percentage_discount("20% Off", 20).unwrap().shared();
        let mut laptop = Product::new("Laptop", dollars(1000), 10)
            .unwrap()
            .with_promotion(twenty);
        assert_eq!(laptop.buy(1).unwrap(), dollars(800));

        let half = Promotion::second_item_half_price("Second Item Half Price")
            .unwrap()
            .shared();
        let mut headphones = Product::new("Headphones", dollars(200), 10)
            .unwrap()
            .with_promotion(half);
        assert_eq!(headphones.buy(1).unwrap(), dollars(200));
        assert_eq!(headphones.buy(2).unwrap(), dollars(300));
        assert_eq!(headphones.buy(3).unwrap(), dollars(500));
        assert_eq!(headphones.quantity(), 4);
        assert_eq!(
            headphones.buy(0),
            Err(CoreError::NonPositiveQuantity { requested: 0 })
        );
    }

    #[test]
    fn test_buy_two_get_one_free_through_buy() {
        let promo = Promotion::buy_two_get_one_free("Buy 2 Get 1 Free").unwrap().shared();
        for (qty, expected) in [(1, 50), (2, 100), (3, 100), (4, 150), (6, 200)] {
            let mut cable = Product::new("USB Cable", dollars(50), 10)
                .unwrap()
                .with_promotion(promo.clone());
            assert_eq!(cable.buy(qty).unwrap(), dollars(expected), "qty {qty}");
        }
    }

    #[test]
    fn test_shared_promotion_is_not_cloned() {
        let promo = Promotion::buy_two_get_one_free("Third One Free!").unwrap().shared();
        let a = macbook(1).with_promotion(promo.clone());
        let b = macbook(1).with_promotion(promo.clone());
        assert!(std::sync::Arc::ptr_eq(
            a.promotion().unwrap(),
            b.promotion().unwrap()
        ));
    }

    #[test]
    fn test_display() {
        let promo = Promotion::second_item_half_price("Second Half price!").unwrap().shared();
        assert_eq!(
            macbook(100).to_string(),
            "MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: None"
        );
        assert_eq!(
            Product::non_stocked("Windows License", dollars(125))
                .unwrap()
                .with_promotion(promo)
                .show(),
            "Windows License, Price: $125.00, Quantity: Unlimited, Promotion: Second Half price!"
        );
        assert_eq!(
            Product::limited("Shipping", dollars(10), 250, 1).unwrap().show(),
            "Shipping, Price: $10.00, Quantity: 250, Limited to 1 per order!, Promotion: None"
        );
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let shipping = Product::limited("Shipping", dollars(10), 250, 1).unwrap();
        let json = serde_json::to_value(shipping.view()).unwrap();
        assert_eq!(json["name"], "Shipping");
        assert_eq!(json["purchaseLimit"], 1);
        assert_eq!(json["kind"]["type"], "limited");
        assert_eq!(json["price"], 1000);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: no sequence of purchases drives stock below zero, and
            /// the product is active exactly while stock remains.
            #[test]
            fn stock_never_negative(
                initial in 1i64..200,
                purchases in proptest::collection::vec(-5i64..60, 0..40),
            ) {
                let mut product = Product::new("Widget", Money::from_cents(199), initial).unwrap();
                for qty in purchases {
                    let before = product.quantity();
                    match product.buy(qty) {
                        Ok(charged) => {
                            prop_assert_eq!(product.quantity(), before - qty);
                            prop_assert_eq!(charged, Money::from_cents(199 * qty));
                        }
                        Err(_) => prop_assert_eq!(product.quantity(), before),
                    }
                    prop_assert!(product.quantity() >= 0);
                    prop_assert_eq!(product.is_active(), product.quantity() > 0);
                }
            }
        }
    }
}

//! # Promotions
//!
//! Pricing strategies a product consults at purchase time.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog setup                                                          │
//! │                                                                         │
//! │   let thirty_off = Arc::new(Promotion::percentage_discount(..)?);      │
//! │                                                                         │
//! │   MacBook ──┐                                                           │
//! │             ├──► Arc<Promotion> "30% off!"   (shared, never mutated)   │
//! │   Pixel 7 ──┘                                                           │
//! │                                                                         │
//! │   Products hold Option<SharedPromotion> and only read it in buy().     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Rules
//! | Rule                 | Total for `q` items at unit price `p`            |
//! |----------------------|--------------------------------------------------|
//! | `PercentageDiscount` | `p × q × (100 − percent) / 100`                  |
//! | `SecondItemHalfPrice`| `⌈q/2⌉ × p + ⌊q/2⌋ × p / 2`                      |
//! | `BuyTwoGetOneFree`   | `((q / 3) × 2 + q % 3) × p`                      |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_discount_percent, validate_product_name};

/// A promotion shared between every product it is attached to.
pub type SharedPromotion = Arc<Promotion>;

// =============================================================================
// Pricing Rule
// =============================================================================

/// The closed set of pricing formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingRule {
    /// Flat percentage off the line total. `percent` is in `0..=100`.
    PercentageDiscount { percent: i64 },
    /// Every second item costs half.
    SecondItemHalfPrice,
    /// Every complete group of three charges for two.
    BuyTwoGetOneFree,
}

impl PricingRule {
    /// `None` when the total does not fit in cents.
    fn total(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        match *self {
            PricingRule::PercentageDiscount { percent } => Some(
                unit_price
                    .checked_multiply_quantity(quantity)?
                    .apply_percentage_discount((percent * 100) as u32),
            ),
            PricingRule::SecondItemHalfPrice => {
                let full = quantity / 2 + quantity % 2;
                let half = quantity / 2;
                unit_price
                    .checked_multiply_quantity(full)?
                    .checked_add(unit_price.checked_multiply_quantity(half)?.half())
            }
            PricingRule::BuyTwoGetOneFree => {
                let payable = (quantity / 3) * 2 + quantity % 3;
                unit_price.checked_multiply_quantity(payable)
            }
        }
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A named pricing rule. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    name: String,
    rule: PricingRule,
}

impl Promotion {
    /// Builds a promotion, validating the name and (for percentage
    /// discounts) the percent.
    pub fn new(name: impl Into<String>, rule: PricingRule) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        if let PricingRule::PercentageDiscount { percent } = rule {
            validate_discount_percent(percent)?;
        }
        Ok(Promotion { name, rule })
    }

    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::promotion::Promotion;
    ///
    /// let promo = Promotion::percentage_discount("20% Off", 20).unwrap();
    /// assert_eq!(promo.apply(Money::from_cents(100_000), 1).unwrap().cents(), 80_000);
    ///
    /// assert!(Promotion::percentage_discount("Invalid Discount", 150).is_err());
    /// ```
    pub fn percentage_discount(name: impl Into<String>, percent: i64) -> CoreResult<Self> {
        Promotion::new(name, PricingRule::PercentageDiscount { percent })
    }

    pub fn second_item_half_price(name: impl Into<String>) -> CoreResult<Self> {
        Promotion::new(name, PricingRule::SecondItemHalfPrice)
    }

    pub fn buy_two_get_one_free(name: impl Into<String>) -> CoreResult<Self> {
        Promotion::new(name, PricingRule::BuyTwoGetOneFree)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PricingRule {
        self.rule
    }

    /// Total price for `quantity` items at `unit_price`.
    ///
    /// Fails with [`CoreError::InvalidQuantity`] when `quantity <= 0`.
    /// Products check quantity first, so a purchase never reaches this error.
    /// Fails with [`CoreError::AmountOverflow`] when the total does not fit.
    pub fn apply(&self, unit_price: Money, quantity: i64) -> CoreResult<Money> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                promotion: self.name.clone(),
                requested: quantity,
            });
        }
        self.rule
            .total(unit_price, quantity)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Wraps the promotion for sharing between products.
    pub fn shared(self) -> SharedPromotion {
        Arc::new(self)
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Constructor-input validation for products and promotions.
//!
//! Every rule here is checked once, at construction time. A value that made it
//! past these validators never needs re-checking later; the only errors raised
//! after construction are purchase errors.
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_discount_percent};
//!
//! assert!(validate_product_name("MacBook Air M2").is_ok());
//! assert!(validate_product_name("").is_err());
//! assert!(validate_discount_percent(150).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or promotion name. Any non-empty string is accepted,
/// whitespace and long names included.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

pub fn validate_purchase_limit(limit: i64) -> ValidationResult<()> {
    if limit < 1 {
        return Err(ValidationError::MustBePositive {
            field: "purchase limit".to_string(),
        });
    }
    Ok(())
}

/// Discount percent must lie in `0..=100`.
pub fn validate_discount_percent(percent: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount percent".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - bad constructor input (field-level)                │
//! │        │                                                                │
//! │        ▼ #[from]                                                        │
//! │  CoreError                                                              │
//! │  ├── InvalidConfiguration   construction time only                     │
//! │  ├── InactiveProduct        ┐                                           │
//! │  ├── NonPositiveQuantity    │ raised by buy, always before any         │
//! │  ├── InsufficientStock      │ mutation of that product                 │
//! │  ├── PurchaseLimitExceeded  ┘                                           │
//! │  ├── InvalidQuantity        promotion pricing                          │
//! │  ├── CartTooLarge           cart preview line cap                      │
//! │  ├── ProductNotFound        order line names an unknown product        │
//! │  ├── StockNotTracked        set_quantity on a non-stocked variant      │
//! │  └── AmountOverflow         price or total beyond the cents range      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries enough context (product name, counts) for a UI to
//! render a message without looking anything up again.

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by products, promotions and the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A constructor received bad input.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),

    /// The product is inactive and cannot be purchased.
    #[error("Cannot buy {name} because it is inactive")]
    InactiveProduct { name: String },

    /// Requested purchase quantity was zero or negative.
    #[error("The quantity to buy must be greater than 0 (requested {requested})")]
    NonPositiveQuantity { requested: i64 },

    /// Requested more than the product has in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// buy(6) on "MacBook Air M2" with 5 in stock
    ///      │
    ///      ▼
    /// InsufficientStock { name: "MacBook Air M2", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient stock for MacBook Air M2: available 5, requested 6"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Requested more than the product allows per purchase (or per order for
    /// add-ons).
    #[error("Purchase limit exceeded for {name}: limit {limit}, requested {requested}")]
    PurchaseLimitExceeded {
        name: String,
        limit: i64,
        requested: i64,
    },

    /// A promotion was asked to price a non-positive quantity.
    #[error("Promotion {promotion} cannot price quantity {requested}")]
    InvalidQuantity { promotion: String, requested: i64 },

    /// Cart preview already holds the maximum number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Stock was set on a variant that does not track stock.
    #[error("{name} does not track stock")]
    StockNotTracked { name: String },

    /// A line price or order total does not fit in an `i64` of cents.
    #[error("Amount is too large to represent")]
    AmountOverflow,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    #[error("{field} must be a non-negative value")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

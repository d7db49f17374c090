//! # storefront-core: Inventory & Order Engine
//!
//! A catalog of heterogeneous products, pluggable promotion pricing, and a
//! store that validates and commits multi-line orders against live stock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            UI / driver (menus, prompts, formatting)             │   │
//! │  │     list active products ─┐          ┌─ commit an order         │   │
//! │  └───────────────────────────┼──────────┼──────────────────────────┘   │
//! │                              │          │                               │
//! │  ┌───────────────────────────▼──────────▼──────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ promotion │  │  product  │  │   store   │  │   cart    │  │   │
//! │  │   │  pricing  │◄─│ variants  │◄─│  order()  │◄─│  preview  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • SINGLE-THREADED • SYNCHRONOUS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Constructor input rules
//! - [`promotion`] - Shared pricing strategies
//! - [`product`] - Product variants and the purchase operation
//! - [`store`] - Catalog queries and order commit
//! - [`cart`] - Tentative-stock cart preview
//!
//! ## Concurrency
//! Everything here assumes one session. `Store::order` reads, checks and
//! mutates each line with no guard; a multi-session caller must serialize
//! order commits (one lock around the whole store is enough).
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Money, OrderLine, Product, Promotion, Store};
//!
//! let third_free = Promotion::buy_two_get_one_free("Third One Free!").unwrap().shared();
//! let earbuds = Product::new("Bose QuietComfort Earbuds", Money::from_major_minor(250, 0), 500)
//!     .unwrap()
//!     .with_promotion(third_free);
//! let earbuds_id = earbuds.id();
//!
//! let mut store = Store::new(vec![earbuds]);
//! let total = store.order(&[OrderLine::new(earbuds_id, 3)]).unwrap();
//!
//! assert_eq!(total, Money::from_major_minor(500, 0));
//! assert_eq!(store.get_total_quantity(), 497);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartPreview;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductId, ProductKind, ProductView};
pub use promotion::{PricingRule, Promotion, SharedPromotion};
pub use store::{OrderLine, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines a cart preview accepts.
///
/// Keeps a runaway driver loop from building an unbounded order.
pub const MAX_CART_LINES: usize = 100;

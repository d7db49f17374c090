//! # Cart Preview
//!
//! Lets a UI assemble a multi-line order and show live "remaining stock"
//! numbers before anything is bought.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartPreview::from_store(&store)                                        │
//! │       │   tentative[id] = stock   (stock-tracked, active products)      │
//! │       ▼                                                                 │
//! │  add_line(p, q) ──► checks against tentative, tentative[p.id] -= q      │
//! │  add_line(..)        (the real catalog is never touched)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.order(cart.lines()) ──► re-validates everything from live state  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tentative table is advisory: it stops a UI from obviously overselling
//! while the cart is built, but the store's commit is the only authority.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::product::{Product, ProductId, ProductKind, ADD_ON_LIMIT};
use crate::store::{OrderLine, Store};
use crate::MAX_CART_LINES;

/// An order under construction plus its tentative stock table.
///
/// ## Invariants
/// - Lines keep the order they were added in; same-product lines are not
///   merged, because limited products are capped per line
/// - `tentative[id] >= 0` for every tracked product
/// - Each add-on appears in at most one line
#[derive(Debug, Clone)]
pub struct CartPreview {
    lines: Vec<OrderLine>,
    initial: HashMap<ProductId, i64>,
    tentative: HashMap<ProductId, i64>,
    add_ons: HashSet<ProductId>,
    created_at: DateTime<Utc>,
}

impl CartPreview {
    /// Snapshots the stock of every active stock-tracked product.
    ///
    /// ```rust
    /// use storefront_core::{CartPreview, Money, Product, Store};
    ///
    /// let earbuds = Product::new("Bose QuietComfort Earbuds", Money::from_major_minor(250, 0), 5).unwrap();
    /// let id = earbuds.id();
    /// let mut store = Store::new(vec![earbuds]);
    ///
    /// let mut cart = CartPreview::from_store(&store);
    /// cart.add_line(store.product(id).unwrap(), 3).unwrap();
    /// assert_eq!(cart.remaining(id), Some(2));
    /// assert!(cart.add_line(store.product(id).unwrap(), 3).is_err());
    ///
    /// // Nothing is bought until the store commits
    /// assert_eq!(store.get_total_quantity(), 5);
    /// store.order(cart.lines()).unwrap();
    /// assert_eq!(store.get_total_quantity(), 2);
    /// ```
    pub fn from_store(store: &Store) -> Self {
        let initial: HashMap<ProductId, i64> = store
            .get_all_products()
            .into_iter()
            .filter(|p| p.tracks_stock())
            .map(|p| (p.id(), p.quantity()))
            .collect();

        CartPreview {
            lines: Vec::new(),
            tentative: initial.clone(),
            initial,
            add_ons: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line after checking it against the tentative table.
    ///
    /// Runs the same checks as a purchase, in the same order, but against
    /// the tentative remaining quantity instead of live stock. On success
    /// the tentative quantity drops by `quantity`; on failure nothing
    /// changes.
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        if !product.is_active() {
            return Err(CoreError::InactiveProduct {
                name: product.name().to_string(),
            });
        }
        if quantity <= 0 {
            return Err(CoreError::NonPositiveQuantity {
                requested: quantity,
            });
        }

        let id = product.id();
        match product.kind() {
            ProductKind::AddOn => {
                let requested = if self.add_ons.contains(&id) {
                    quantity + ADD_ON_LIMIT
                } else {
                    quantity
                };
                if requested > ADD_ON_LIMIT {
                    return Err(CoreError::PurchaseLimitExceeded {
                        name: product.name().to_string(),
                        limit: ADD_ON_LIMIT,
                        requested,
                    });
                }
                self.add_ons.insert(id);
            }
            ProductKind::NonStocked => {}
            ProductKind::Standard | ProductKind::Limited { .. } => {
                if let Some(limit) = product.purchase_limit() {
                    if quantity > limit {
                        return Err(CoreError::PurchaseLimitExceeded {
                            name: product.name().to_string(),
                            limit,
                            requested: quantity,
                        });
                    }
                }
                // Products activated or added after the snapshot start from live stock
                let available = self
                    .tentative
                    .get(&id)
                    .copied()
                    .unwrap_or_else(|| product.quantity());
                if quantity > available {
                    return Err(CoreError::InsufficientStock {
                        name: product.name().to_string(),
                        available,
                        requested: quantity,
                    });
                }
                self.initial.entry(id).or_insert_with(|| product.quantity());
                self.tentative.insert(id, available - quantity);
            }
        }

        self.lines.push(OrderLine::new(id, quantity));
        Ok(())
    }

    /// Tentative remaining stock, `None` for products without tracked stock
    /// (or that were neither active at the snapshot nor added since).
    pub fn remaining(&self, id: ProductId) -> Option<i64> {
        self.tentative.get(&id).copied()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Drops every line and restores the tentative table to its snapshot.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.add_ons.clear();
        self.tentative = self.initial.clone();
        self.created_at = Utc::now();
    }

    /// Hands the lines over for commit.
    pub fn into_lines(self) -> Vec<OrderLine> {
        self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Store
//!
//! The catalog plus the order commit.
//!
//! ## Order Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order([(A, 2), (B, 1), (C, 5)])                                        │
//! │                                                                         │
//! │   line 1: A.buy(2) ──► ok, A.stock -= 2      total = a                  │
//! │   line 2: B.buy(1) ──► ok, B.stock -= 1      total = a + b              │
//! │   line 3: C.buy(5) ──► InsufficientStock                                │
//! │                │                                                        │
//! │                ▼                                                        │
//! │   Err(InsufficientStock). A and B stay decremented (no rollback).      │
//! │                                                                         │
//! │  order_atomic(..) runs the same lines against staged copies first and  │
//! │  only swaps them into the catalog when every line succeeded.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Product, ProductId, ProductKind, ADD_ON_LIMIT};

// =============================================================================
// Order Line
// =============================================================================

/// One (product, quantity) pair of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        OrderLine {
            product_id,
            quantity,
        }
    }
}

impl From<(ProductId, i64)> for OrderLine {
    fn from((product_id, quantity): (ProductId, i64)) -> Self {
        OrderLine::new(product_id, quantity)
    }
}

// =============================================================================
// Store
// =============================================================================

/// An ordered catalog of products. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Creates a store from an initial product list. Later duplicates of an
    /// id already in the list are dropped.
    ///
    /// ```rust
    /// use storefront_core::{Money, OrderLine, Product, Store};
    ///
    /// let pixel = Product::new("Google Pixel 7", Money::from_major_minor(500, 0), 250).unwrap();
    /// let id = pixel.id();
    /// let mut store = Store::new(vec![pixel]);
    ///
    /// let total = store.order(&[OrderLine::new(id, 2)]).unwrap();
    /// assert_eq!(total, Money::from_major_minor(1000, 0));
    /// assert_eq!(store.get_total_quantity(), 248);
    /// ```
    pub fn new(products: Vec<Product>) -> Self {
        let mut store = Store::default();
        for product in products {
            store.add_product(product);
        }
        store
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Appends a product. No-op (returns `false`) if its id is already listed.
    pub fn add_product(&mut self, product: Product) -> bool {
        if self.contains(product.id()) {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Removes and returns a product. No-op (returns `None`) if absent.
    pub fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id() == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Mutable access for restocking, reactivation and promotion changes.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// The full catalog, active and inactive.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Active products in catalog order.
    pub fn get_all_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Sum of reported quantities over the whole catalog, inactive included.
    pub fn get_total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Buys every line in order and returns the summed charge.
    ///
    /// Fails fast on the first failing line. Lines before it have already
    /// been bought and stay bought; the partial total is discarded. Use
    /// [`Store::order_atomic`] when that is not acceptable.
    ///
    /// An empty order returns zero and changes nothing.
    pub fn order(&mut self, lines: &[OrderLine]) -> CoreResult<Money> {
        let mut total = Money::zero();
        let mut add_ons = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            let product = self
                .products
                .iter_mut()
                .find(|p| p.id() == line.product_id)
                .ok_or(CoreError::ProductNotFound(line.product_id))?;

            match buy_line(product, line, &mut add_ons, total) {
                Ok(running) => total = running,
                Err(err) => {
                    debug!(line = index, error = %err, "Order line failed, earlier lines stay committed");
                    return Err(err);
                }
            }
        }

        debug!(lines = lines.len(), %total, "Order committed");
        Ok(total)
    }

    /// Two-phase variant of [`Store::order`]: all lines are bought against
    /// staged copies of the products they touch, and the catalog is only
    /// updated if every line succeeds. On failure nothing changes.
    ///
    /// Lines for the same product are checked against their combined
    /// demand, exactly as sequential purchases would be.
    pub fn order_atomic(&mut self, lines: &[OrderLine]) -> CoreResult<Money> {
        let mut staged: HashMap<ProductId, Product> = HashMap::new();
        let mut add_ons = HashMap::new();
        let mut total = Money::zero();

        for line in lines {
            let product = match staged.entry(line.product_id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let live = self
                        .products
                        .iter()
                        .find(|p| p.id() == line.product_id)
                        .ok_or(CoreError::ProductNotFound(line.product_id))?;
                    entry.insert(live.clone())
                }
            };
            total = buy_line(product, line, &mut add_ons, total)?;
        }

        for product in self.products.iter_mut() {
            if let Some(updated) = staged.remove(&product.id()) {
                *product = updated;
            }
        }

        debug!(lines = lines.len(), %total, "Atomic order committed");
        Ok(total)
    }

    // -------------------------------------------------------------------------
    // Combining
    // -------------------------------------------------------------------------

    /// A new store listing this catalog followed by the products of `other`
    /// that are not already present.
    pub fn merge(&self, other: &Store) -> Store {
        let mut merged = self.clone();
        for product in &other.products {
            merged.add_product(product.clone());
        }
        merged
    }
}

/// Buys a single line, enforcing the once-per-order rule for add-ons.
/// Buys one order line and returns `total` plus its charge.
///
/// The running total is checked before stock moves, so a line whose charge
/// would overflow the order total leaves its product untouched.
fn buy_line(
    product: &mut Product,
    line: &OrderLine,
    add_ons: &mut HashMap<ProductId, i64>,
    total: Money,
) -> CoreResult<Money> {
    if product.kind() == ProductKind::AddOn {
        if let Some(already) = add_ons.get(&line.product_id) {
            return Err(CoreError::PurchaseLimitExceeded {
                name: product.name().to_string(),
                limit: ADD_ON_LIMIT,
                requested: already + line.quantity,
            });
        }
    }

    product.check_purchase(line.quantity)?;
    let charged = product.price_for(line.quantity)?;
    let total = total.checked_add(charged).ok_or(CoreError::AmountOverflow)?;
    product.commit_purchase(line.quantity);
    trace!(product = %product.name(), quantity = line.quantity, %charged, "Line bought");

    if product.kind() == ProductKind::AddOn {
        add_ons.insert(line.product_id, line.quantity);
    }
    Ok(total)
}

impl Add for Store {
    type Output = Store;

    fn add(mut self, other: Store) -> Store {
        for product in other.products {
            self.add_product(product);
        }
        self
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, product) in self.products.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", product)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

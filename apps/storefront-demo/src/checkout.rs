//! # Checkout
//!
//! Turns a scripted list of `(product name, quantity)` pairs into a committed
//! order, the same way an interactive front end would:
//!
//! ```text
//! script line ──► find active product by name ──► CartPreview::add_line
//!                       │ not found                    │ rejected
//!                       ▼                              ▼
//!                  skipped (reported)             skipped (reported)
//!
//! all accepted lines ──► Store::order / Store::order_atomic ──► report
//! ```

use tracing::{debug, warn};

use storefront_core::{CartPreview, CoreError, Money, Store};

/// Outcome of one scripted checkout.
#[derive(Debug)]
pub struct CheckoutReport {
    /// Lines the preview refused, with the reason.
    pub skipped: Vec<(String, String)>,
    /// Number of lines sent to the store.
    pub committed_lines: usize,
    /// The store's answer for the commit.
    pub result: Result<Money, CoreError>,
}

/// Builds a cart from `script` against the active catalog and commits it.
pub fn run_checkout(store: &mut Store, script: &[(String, i64)], atomic: bool) -> CheckoutReport {
    let mut cart = CartPreview::from_store(store);
    let mut skipped = Vec::new();

    for (name, quantity) in script {
        let Some(product) = store.get_all_products().into_iter().find(|p| p.name() == name.as_str())
        else {
            warn!(product = %name, "No active product with this name");
            skipped.push((name.clone(), "no active product with this name".to_string()));
            continue;
        };

        match cart.add_line(product, *quantity) {
            Ok(()) => debug!(
                product = %name,
                quantity,
                remaining = ?cart.remaining(product.id()),
                "Line added to cart"
            ),
            Err(err) => {
                warn!(product = %name, error = %err, "Line rejected by cart preview");
                skipped.push((name.clone(), err.to_string()));
            }
        }
    }

    let lines = cart.into_lines();
    let result = if atomic {
        store.order_atomic(&lines)
    } else {
        store.order(&lines)
    };

    CheckoutReport {
        skipped,
        committed_lines: lines.len(),
        result,
    }
}

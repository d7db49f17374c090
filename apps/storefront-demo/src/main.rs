//! # Storefront Demo
//!
//! Non-interactive stand-in for the store's console front end.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from `STOREFRONT_*` environment variables
//! 3. Build the catalog (JSON file or built-in)
//! 4. List active products and total stock
//! 5. Assemble the scripted order through the cart preview and commit it
//! 6. Report the result and the stock left

mod catalog;
mod checkout;
mod config;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_core::Store;

use crate::checkout::run_checkout;
use crate::config::DemoConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = DemoConfig::load()?;
    info!(
        store = %config.store_name,
        catalog = ?config.catalog_path,
        atomic = config.atomic_orders,
        "Configuration loaded"
    );

    let mut store = match &config.catalog_path {
        Some(path) => catalog::load_catalog(path)?,
        None => catalog::builtin_catalog()?,
    };
    info!(products = store.products().len(), "Catalog ready");

    println!("Welcome to the {} Store!", config.store_name);
    list_active_products(&store);
    println!("Total amount of all products in store: {}", store.get_total_quantity());

    let script = config.order_lines()?;
    let report = run_checkout(&mut store, &script, config.atomic_orders);

    println!();
    for (name, reason) in &report.skipped {
        println!("Skipped {}: {}", name, reason);
    }
    match &report.result {
        Ok(total) => println!(
            "Order successful! {} line(s) - Total cost: {}",
            report.committed_lines, total
        ),
        Err(err) => {
            error!(error = %err, "Order failed");
            println!("Order failed: {}", err);
        }
    }

    println!();
    list_active_products(&store);
    println!("Total amount of all products in store: {}", store.get_total_quantity());

    Ok(())
}

fn list_active_products(store: &Store) {
    let products = store.get_all_products();
    if products.is_empty() {
        println!("No active products in store.");
        return;
    }
    for (index, product) in products.iter().enumerate() {
        println!("{}. {}", index + 1, product);
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Show every bought line
/// - Default: INFO, DEBUG for the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_core=debug,storefront_demo=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

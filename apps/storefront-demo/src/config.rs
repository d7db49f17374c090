//! Demo configuration.
//!
//! Loaded from environment variables with fallback to defaults.
//!
//! | Variable                   | Default                                  |
//! |----------------------------|------------------------------------------|
//! | `STOREFRONT_STORE_NAME`    | `Best Buy`                               |
//! | `STOREFRONT_CATALOG_PATH`  | unset (built-in catalog)                 |
//! | `STOREFRONT_ATOMIC_ORDERS` | `false` (fail-fast, partial commit)      |
//! | `STOREFRONT_ORDER`         | [`DEFAULT_ORDER`]                        |

use std::env;
use std::path::PathBuf;

/// Order placed when `STOREFRONT_ORDER` is unset.
pub const DEFAULT_ORDER: &str =
    "MacBook Air M2=2,Bose QuietComfort Earbuds=3,Windows License=1,Shipping=1,Extended Warranty=1";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Shown in the banner.
    pub store_name: String,

    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,

    /// Commit with `Store::order_atomic` instead of `Store::order`.
    pub atomic_orders: bool,

    /// `name=quantity` pairs separated by commas.
    pub order_script: String,
}

impl DemoConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = DemoConfig {
            store_name: lookup("STOREFRONT_STORE_NAME").unwrap_or_else(|| "Best Buy".to_string()),

            catalog_path: lookup("STOREFRONT_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),

            atomic_orders: lookup("STOREFRONT_ATOMIC_ORDERS")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_ATOMIC_ORDERS".to_string()))?,

            order_script: lookup("STOREFRONT_ORDER").unwrap_or_else(|| DEFAULT_ORDER.to_string()),
        };

        // Malformed order scripts are rejected at load
        config.order_lines()?;

        Ok(config)
    }

    /// Parses the order script into `(product name, quantity)` pairs.
    pub fn order_lines(&self) -> Result<Vec<(String, i64)>, ConfigError> {
        parse_order_script(&self.order_script)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            store_name: "Best Buy".to_string(),
            catalog_path: None,
            atomic_orders: false,
            order_script: DEFAULT_ORDER.to_string(),
        }
    }
}

/// `"Google Pixel 7=2, Shipping=1"` → `[("Google Pixel 7", 2), ("Shipping", 1)]`.
///
/// Quantities are passed through as-is (zero and negatives included); the
/// core decides whether they are valid.
pub fn parse_order_script(script: &str) -> Result<Vec<(String, i64)>, ConfigError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, quantity) = entry
                .rsplit_once('=')
                .ok_or_else(|| ConfigError::InvalidOrderLine(entry.to_string()))?;
            let quantity = quantity
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidOrderLine(entry.to_string()))?;
            Ok((name.trim().to_string(), quantity))
        })
        .collect()
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid order line '{0}', expected name=quantity")]
    InvalidOrderLine(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DemoConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.order_lines().unwrap().len(), 5);
    }

    #[test]
    fn test_overrides() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_STORE_NAME", "Corner Shop"),
            ("STOREFRONT_CATALOG_PATH", "/tmp/catalog.json"),
            ("STOREFRONT_ATOMIC_ORDERS", "true"),
            ("STOREFRONT_ORDER", "Google Pixel 7=2"),
        ]))
        .unwrap();
        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(config.atomic_orders);
        assert_eq!(
            config.order_lines().unwrap(),
            vec![("Google Pixel 7".to_string(), 2)]
        );
    }

    #[test]
    fn test_invalid_bool() {
        let err = DemoConfig::from_lookup(lookup_from(&[("STOREFRONT_ATOMIC_ORDERS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "STOREFRONT_ATOMIC_ORDERS"));
    }

    #[test]
    fn test_invalid_order_script_fails_at_load() {
        let err = DemoConfig::from_lookup(lookup_from(&[("STOREFRONT_ORDER", "Shipping")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrderLine(_)));
    }

    #[test]
    fn test_parse_order_script() {
        assert_eq!(
            parse_order_script(" MacBook Air M2 = 1 ,, Shipping=0 ,").unwrap(),
            vec![("MacBook Air M2".to_string(), 1), ("Shipping".to_string(), 0)]
        );
        assert!(parse_order_script("").unwrap().is_empty());
        assert!(parse_order_script("Shipping=one").is_err());
    }
}

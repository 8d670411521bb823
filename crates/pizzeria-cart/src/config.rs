//! # Cart Configuration
//!
//! Limits and display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PIZZERIA_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! | Variable                     | Field               | Default |
//! |------------------------------|---------------------|---------|
//! | `PIZZERIA_CURRENCY_SYMBOL`   | `currency_symbol`   | `$`     |
//! | `PIZZERIA_MAX_CART_LINES`    | `max_cart_lines`    | 50      |
//! | `PIZZERIA_MAX_ITEM_QUANTITY` | `max_item_quantity` | 99      |
//! | `PIZZERIA_MAX_MODIFICATIONS` | `max_modifications` | 20      |
//! | `PIZZERIA_STRICT_SIZES`      | `strict_sizes`      | false   |
//!
//! Limits can be lowered from their defaults but not raised. Values above
//! the default are capped and logged.
//!
//! Configuration is read-only after initialization.

use std::fmt::Display;
use std::str::FromStr;

use pizzeria_core::{Money, MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_MODIFICATIONS_PER_PIZZA};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Maximum number of lines in one cart
    pub max_cart_lines: usize,

    /// Maximum quantity of a single line
    pub max_item_quantity: i64,

    /// Maximum topping changes on one pizza
    pub max_modifications: usize,

    /// Refuse size labels that match no tier instead of pricing at medium
    pub strict_sizes: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            currency_symbol: "$".to_string(),
            max_cart_lines: MAX_CART_LINES,
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_modifications: MAX_MODIFICATIONS_PER_PIZZA,
            strict_sizes: false,
        }
    }
}

impl CartConfig {
    /// Creates a CartConfig from environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Invalid values keep the default
    /// and are logged.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CartConfig::default();

        if let Some(symbol) = lookup("PIZZERIA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        override_from(&lookup, "PIZZERIA_MAX_CART_LINES", &mut config.max_cart_lines);
        override_from(&lookup, "PIZZERIA_MAX_ITEM_QUANTITY", &mut config.max_item_quantity);
        override_from(&lookup, "PIZZERIA_MAX_MODIFICATIONS", &mut config.max_modifications);

        cap_at("PIZZERIA_MAX_CART_LINES", &mut config.max_cart_lines, MAX_CART_LINES);
        cap_at("PIZZERIA_MAX_ITEM_QUANTITY", &mut config.max_item_quantity, MAX_ITEM_QUANTITY);
        cap_at(
            "PIZZERIA_MAX_MODIFICATIONS",
            &mut config.max_modifications,
            MAX_MODIFICATIONS_PER_PIZZA,
        );

        if let Some(raw) = lookup("PIZZERIA_STRICT_SIZES") {
            match parse_flag(&raw) {
                Some(flag) => config.strict_sizes = flag,
                None => warn!(value = %raw, "Ignoring invalid PIZZERIA_STRICT_SIZES"),
            }
        }

        config
    }

    /// Formats money with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_cart::CartConfig;
    /// use pizzeria_core::Money;
    ///
    /// let config = CartConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(e) => warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value"),
        }
    }
}

/// Limits may be lowered but never raised past the engine's caps.
fn cap_at<T>(key: &str, value: &mut T, cap: T)
where
    T: PartialOrd + Display + Copy,
{
    if *value > cap {
        warn!(key, value = %value, cap = %cap, "Configuration value above limit, using limit");
        *value = cap;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
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
        let config = CartConfig::from_lookup(|_| None);
        assert_eq!(config, CartConfig::default());
        assert!(!config.strict_sizes);
        assert_eq!(config.max_modifications, MAX_MODIFICATIONS_PER_PIZZA);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("PIZZERIA_CURRENCY_SYMBOL", "€"),
            ("PIZZERIA_MAX_CART_LINES", "10"),
            ("PIZZERIA_MAX_ITEM_QUANTITY", " 5 "),
            ("PIZZERIA_MAX_MODIFICATIONS", "8"),
            ("PIZZERIA_STRICT_SIZES", "yes"),
        ]));

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.max_cart_lines, 10);
        assert_eq!(config.max_item_quantity, 5);
        assert_eq!(config.max_modifications, 8);
        assert!(config.strict_sizes);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("PIZZERIA_MAX_CART_LINES", "lots"),
            ("PIZZERIA_STRICT_SIZES", "maybe"),
        ]));

        assert_eq!(config.max_cart_lines, MAX_CART_LINES);
        assert!(!config.strict_sizes);
    }

    #[test]
    fn test_limits_cannot_exceed_caps() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("PIZZERIA_MAX_CART_LINES", "100000"),
            ("PIZZERIA_MAX_ITEM_QUANTITY", "9223372036854775807"),
            ("PIZZERIA_MAX_MODIFICATIONS", "500"),
        ]));

        assert_eq!(config.max_cart_lines, MAX_CART_LINES);
        assert_eq!(config.max_item_quantity, MAX_ITEM_QUANTITY);
        assert_eq!(config.max_modifications, MAX_MODIFICATIONS_PER_PIZZA);
    }

    #[test]
    fn test_format_currency() {
        let config = CartConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(0)), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}

//! # pizzeria-core: Pure Topping Pricing for the Pizzeria Storefront
//!
//! This crate decides what a pizza customization costs. Every function is
//! pure with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pizzeria Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (web)                             │   │
//! │  │    Menu ──► Customize Pizza ──► Cart ──► Checkout               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ customization payload (JSON)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pizzeria-cart (cart lines)                      │   │
//! │  │    catalog lookup, half-and-half checks, payload storage        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pizzeria-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Topping  │  │   Money   │  │  tiers    │  │  catalog  │  │   │
//! │  │   │  SizeTier │  │  decimal  │  │  swaps    │  │  halves   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Topping, SizeTier, ToppingModification, results
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tier prices, replacement rules, customization totals
//! - [`validation`] - Catalog and pizza line validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pizzeria_core::money::Money;
//! use pizzeria_core::pricing::calculate_customization_total;
//! use pizzeria_core::{Topping, ToppingCategory, ToppingModification};
//!
//! let extra_cheese = Topping {
//!     id: "extra-cheese".into(),
//!     name: "Extra Cheese".into(),
//!     category: ToppingCategory::Cheese,
//!     small_price: Money::from_cents(125),
//!     medium_price: Money::from_cents(175),
//!     large_price: Money::from_cents(225),
//! };
//!
//! let summary = calculate_customization_total(
//!     &[ToppingModification::add(extra_cheese)],
//!     "10\"",
//!     0,
//! );
//! assert_eq!(summary.total.cents(), 125);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Replacements per pizza that can be free.
///
/// Every replacement past this count is charged at the new topping's full
/// tier price, whatever the categories.
pub const FREE_REPLACEMENTS_PER_PIZZA: u32 = 1;

/// Cap on topping changes for a single pizza line. Configuration may lower it.
pub const MAX_MODIFICATIONS_PER_PIZZA: usize = 20;

/// Cap on lines in one cart. Configuration may lower it.
pub const MAX_CART_LINES: usize = 50;

/// Cap on the quantity of a single cart line. Configuration may lower it.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Highest accepted base or topping price ($10,000.00).
///
/// Together with the caps above this keeps every cart total far inside
/// `i64` cents.
pub const MAX_PRICE: Money = Money::from_cents(1_000_000);

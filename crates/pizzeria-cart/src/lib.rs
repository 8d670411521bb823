//! # pizzeria-cart: Cart Lines for the Pizzeria Storefront
//!
//! Connects the storefront's cart to the pricing engine in `pizzeria-core`.
//!
//! ## Module Organization
//! ```text
//! pizzeria_cart/
//! ├── lib.rs          ◄─── You are here (exports, logging setup)
//! ├── catalog.rs      ◄─── Read-only topping catalog, request resolution
//! ├── cart.rs         ◄─── Cart, CartLine, CartTotals, CartState
//! ├── payload.rs      ◄─── Stored customization payload (JSON)
//! ├── config.rs       ◄─── CartConfig from PIZZERIA_* env vars
//! ├── error.rs        ◄─── CartError and ErrorResponse
//! └── bin/quote.rs    ◄─── Price an order file from the command line
//! ```
//!
//! ## Customization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [{type: "replace", toppingId: "pepperoni", replacedToppingId: ...}]   │
//! │         │                                                               │
//! │         ▼  ToppingCatalog::resolve                                      │
//! │  ToppingModification (with topping snapshots)                           │
//! │         │                                                               │
//! │         ▼  validate count, half-and-half, size                          │
//! │  pizzeria_core::pricing (fold with replacement counter)                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CustomizationPayload stored on the CartLine                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod payload;

use tracing_subscriber::EnvFilter;

pub use cart::{Cart, CartLine, CartState, CartTotals, NewLine};
pub use catalog::{ModificationRequest, ToppingCatalog};
pub use config::CartConfig;
pub use error::{CartError, CartResult, ErrorCode, ErrorResponse};
pub use payload::CustomizationPayload;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pizzeria_cart=trace` - Trace the cart crate only
/// - Default: INFO, DEBUG for pizzeria crates
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pizzeria_cart=debug,pizzeria_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # Cart
//!
//! The customer's cart: pizza lines, their customization payloads, totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Cart Method             State Change          │
//! │  ─────────────────        ───────────             ────────────          │
//! │                                                                         │
//! │  Add Pizza ──────────────► add_line() ──────────► lines.push(line)     │
//! │                                                                         │
//! │  Edit Toppings ──────────► customize_line() ────► line.customization   │
//! │                            (reprice from scratch)   = new payload       │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► line.quantity = n    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_line() ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Reload Saved Cart ──────► restore_line() ──────► verify + push        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use pizzeria_core::money::decimal_string;
use pizzeria_core::pricing::customization_total_at_tier;
use pizzeria_core::validation::{
    resolve_size_tier, validate_half_targeting, validate_modification_count, validate_price,
    validate_quantity,
};
use pizzeria_core::{
    CustomizationSummary, Money, SizeTier, ToppingModification, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::{ModificationRequest, ToppingCatalog};
use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::payload::CustomizationPayload;

/// A pizza the customer is putting in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewLine {
    pub menu_item_id: String,
    pub name: String,

    /// Size label from menu configuration, e.g. `Medium (12")`.
    pub size: String,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub base_price: Money,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default)]
    pub gluten_free: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

/// A line in the cart.
///
/// `base_price` is frozen when the line is added; topping prices are frozen
/// inside the customization payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line id (UUID v4)
    pub id: String,

    pub menu_item_id: String,
    pub name: String,
    pub size: String,
    pub gluten_free: bool,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub base_price: Money,

    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,

    pub customization: CustomizationPayload,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_new(line: NewLine) -> Self {
        let customization = CustomizationPayload::plain(line.size.clone(), line.gluten_free);
        CartLine {
            id: Uuid::new_v4().to_string(),
            menu_item_id: line.menu_item_id,
            name: line.name,
            size: line.size,
            gluten_free: line.gluten_free,
            base_price: line.base_price,
            quantity: line.quantity,
            notes: line.notes,
            customization,
            added_at: Utc::now(),
        }
    }

    /// Base price plus topping charges for one pizza.
    pub fn unit_price(&self) -> Money {
        self.base_price + self.customization.topping_charge
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Topping charges × quantity.
    pub fn topping_total(&self) -> Money {
        self.customization.topping_charge.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Every line's quantity is between 1 and `max_item_quantity`
/// - Every line's payload charge equals the repriced charge of its
///   stored modifications
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a pizza with no topping changes and returns its line.
    pub fn add_line(&mut self, line: NewLine, config: &CartConfig) -> CartResult<&CartLine> {
        if self.lines.len() >= config.max_cart_lines {
            return Err(CartError::CartTooLarge {
                max: config.max_cart_lines,
            });
        }

        validate_quantity(line.quantity, config.max_item_quantity)?;
        validate_price("base price", line.base_price)?;
        size_tier(&line.size, config)?;

        let line = CartLine::from_new(line);
        info!(line_id = %line.id, item = %line.name, size = %line.size, "Added cart line");

        self.lines.push(line);
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Replaces a line's topping changes with `requests` and reprices it.
    ///
    /// `requests` is the full list in the order the customer made the changes;
    /// the first accepted replacement is the free one. Rejected changes are
    /// kept in the payload and returned in the summary, not raised as errors.
    ///
    /// ## Errors
    /// - line or topping id unknown
    /// - too many changes
    /// - left/right changes on a pizza that cannot be split
    /// - unknown size while `strict_sizes` is on
    pub fn customize_line(
        &mut self,
        line_id: &str,
        requests: &[ModificationRequest],
        catalog: &ToppingCatalog,
        config: &CartConfig,
    ) -> CartResult<CustomizationSummary> {
        let line = self.line_mut(line_id)?;

        validate_modification_count(requests.len(), config.max_modifications)?;

        let modifications = requests
            .iter()
            .map(|request| catalog.resolve(request))
            .collect::<CartResult<Vec<ToppingModification>>>()?;

        validate_half_targeting(&modifications, &line.size, line.gluten_free)?;

        let tier = size_tier(&line.size, config)?;
        let summary = customization_total_at_tier(&modifications, tier, 0);

        for rejected in &summary.rejected {
            warn!(
                line_id = %line.id,
                index = rejected.index,
                topping = %rejected.modification.topping.id,
                reason = %rejected.reason,
                "Topping change not applied"
            );
        }
        debug!(
            line_id = %line.id,
            %tier,
            charge = %summary.total,
            replacements = summary.replacements_used,
            "Repriced cart line"
        );

        line.customization = CustomizationPayload::from_summary(
            line.size.clone(),
            line.gluten_free,
            summary.clone(),
        );

        Ok(summary)
    }

    /// Updates a line's quantity. Zero removes the line.
    pub fn update_quantity(
        &mut self,
        line_id: &str,
        quantity: i64,
        config: &CartConfig,
    ) -> CartResult<()> {
        if quantity == 0 {
            return self.remove_line(line_id).map(|_| ());
        }

        validate_quantity(quantity, config.max_item_quantity)?;
        self.line_mut(line_id)?.quantity = quantity;
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_line(&mut self, line_id: &str) -> CartResult<CartLine> {
        let position = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_string()))?;

        let line = self.lines.remove(position);
        info!(line_id = %line.id, item = %line.name, "Removed cart line");
        Ok(line)
    }

    /// Puts a previously stored line back.
    ///
    /// The line goes through the same checks as a fresh add, and its payload
    /// must belong to it and still reprice to the stored charge.
    ///
    /// ## Errors
    /// - cart full, or a line with the same id already present
    /// - quantity, base price or size rejected as in [`Cart::add_line`]
    /// - payload priced for another size or crust, or breaking the
    ///   half-and-half and modification rules
    /// - stale payload charge
    pub fn restore_line(&mut self, line: CartLine, config: &CartConfig) -> CartResult<()> {
        if self.lines.len() >= config.max_cart_lines {
            return Err(CartError::CartTooLarge {
                max: config.max_cart_lines,
            });
        }

        if self.line(&line.id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "cart line id".to_string(),
                value: line.id,
            }
            .into());
        }

        validate_quantity(line.quantity, config.max_item_quantity)?;
        validate_price("base price", line.base_price)?;
        size_tier(&line.size, config)?;

        line.customization
            .check_line(&line.size, line.gluten_free, config.max_modifications)?;
        line.customization.verify()?;

        info!(line_id = %line.id, item = %line.name, "Restored cart line");
        self.lines.push(line);
        Ok(())
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    fn line_mut(&mut self, line_id: &str) -> CartResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_string()))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Topping charges across all lines.
    pub fn topping_charges(&self) -> Money {
        self.lines.iter().map(CartLine::topping_total).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// True when any line has topping changes that were not applied.
    pub fn has_rejections(&self) -> bool {
        self.lines.iter().any(|l| l.customization.has_rejections())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn size_tier(size: &str, config: &CartConfig) -> CartResult<SizeTier> {
    let tier = resolve_size_tier(size, config.strict_sizes)?;

    if SizeTier::parse_strict(size).is_none() {
        warn!(size, "Size label matched no tier, pricing toppings at medium");
    }

    Ok(tier)
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub topping_charges: Money,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub subtotal: Money,

    /// Checkout should warn the customer when this is set.
    pub has_rejections: bool,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            topping_charges: cart.topping_charges(),
            subtotal: cart.subtotal(),
            has_rejections: cart.has_rejections(),
        }
    }
}

/// Shared cart for hosts that serve several requests against one cart.
///
/// Clones share the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.customize_line(&id, &requests, &catalog, &config))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

//! # Customization Payload
//!
//! The JSON record stored next to a cart line's quantity and notes. It is
//! written on every customization edit and read back when the cart is
//! restored or the order line is finalized.
//!
//! ## Shape
//! ```json
//! {
//!   "size": "Large (14\")",
//!   "glutenFree": false,
//!   "modifications": [
//!     { "type": "replace", "topping": { ... }, "replacedTopping": { ... } }
//!   ],
//!   "toppingCharge": "2.50",
//!   "replacementsUsed": 1,
//!   "rejected": [ { "index": 1, "modification": { ... }, "reason": "..." } ]
//! }
//! ```
//!
//! `modifications` holds only the accepted changes, in the order the customer
//! made them, with topping snapshots (prices frozen at customization time).
//! Repricing them therefore reproduces `toppingCharge` exactly.

use pizzeria_core::money::decimal_string;
use pizzeria_core::pricing::calculate_customization_total;
use pizzeria_core::validation::{
    validate_half_targeting, validate_modification_count, validate_topping,
};
use pizzeria_core::{CustomizationSummary, Money, RejectedModification, ToppingModification};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{CartError, CartResult};

/// Stored customization record for one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationPayload {
    /// Size label the charges were computed for.
    pub size: String,

    #[serde(default)]
    pub gluten_free: bool,

    /// Accepted modifications, in customer order.
    #[serde(default)]
    pub modifications: Vec<ToppingModification>,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub topping_charge: Money,

    #[serde(default)]
    pub replacements_used: u32,

    /// Modifications the customer asked for that were not applied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedModification>,
}

impl CustomizationPayload {
    /// Payload for a pizza with no topping changes.
    pub fn plain(size: impl Into<String>, gluten_free: bool) -> Self {
        CustomizationPayload {
            size: size.into(),
            gluten_free,
            modifications: Vec::new(),
            topping_charge: Money::zero(),
            replacements_used: 0,
            rejected: Vec::new(),
        }
    }

    /// Payload recording a priced summary.
    pub fn from_summary(
        size: impl Into<String>,
        gluten_free: bool,
        summary: CustomizationSummary,
    ) -> Self {
        let modifications = summary.accepted_modifications();
        CustomizationPayload {
            size: size.into(),
            gluten_free,
            modifications,
            topping_charge: summary.total,
            replacements_used: summary.replacements_used,
            rejected: summary.rejected,
        }
    }

    pub fn to_json(&self) -> CartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reprices the stored modifications from scratch.
    pub fn reprice(&self) -> CustomizationSummary {
        calculate_customization_total(&self.modifications, &self.size, 0)
    }

    /// Checks that the stored charge still matches its modifications.
    ///
    /// A mismatch means the payload was edited outside the engine or was
    /// written by different pricing rules.
    pub fn verify(&self) -> CartResult<()> {
        let recomputed = self.reprice().total;

        if recomputed != self.topping_charge {
            warn!(
                size = %self.size,
                stored = %self.topping_charge,
                recomputed = %recomputed,
                "Stored customization charge is stale"
            );
            return Err(CartError::StalePayload {
                stored: self.topping_charge,
                recomputed,
            });
        }

        Ok(())
    }

    /// Checks that this payload belongs to a pizza of `size` and crust, and
    /// that its stored modifications still pass the cart's rules.
    ///
    /// ## Errors
    /// - size or gluten-free flag differs from the line's
    /// - more than `max_modifications` stored changes
    /// - a stored topping snapshot fails [`validate_topping`]
    /// - left/right changes on a pizza that cannot be split
    pub fn check_line(
        &self,
        size: &str,
        gluten_free: bool,
        max_modifications: usize,
    ) -> CartResult<()> {
        if self.size != size {
            return Err(CartError::PayloadMismatch(format!(
                "priced for size '{}', line is '{}'",
                self.size, size
            )));
        }
        if self.gluten_free != gluten_free {
            return Err(CartError::PayloadMismatch(format!(
                "gluten-free is {}, line is {}",
                self.gluten_free, gluten_free
            )));
        }

        validate_modification_count(self.modifications.len(), max_modifications)?;

        for modification in &self.modifications {
            validate_topping(&modification.topping)?;
            if let Some(replaced) = &modification.replaced_topping {
                validate_topping(replaced)?;
            }
        }

        validate_half_targeting(&self.modifications, size, gluten_free)?;

        Ok(())
    }

    #[inline]
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

//! # Domain Types
//!
//! Types shared by the pricing engine, the cart layer and the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌────────────────┐   │
//! │  │    Topping      │   │ ToppingModification  │   │   SizeTier     │   │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ────────────  │   │
//! │  │  id, name       │◄──│  type (add/remove/   │   │  Small         │   │
//! │  │  category       │   │        replace)      │   │  Medium        │   │
//! │  │  small_price    │   │  topping             │   │  Large         │   │
//! │  │  medium_price   │   │  replaced_topping?   │   └────────────────┘   │
//! │  │  large_price    │   │  half?               │                        │
//! │  └─────────────────┘   └──────────────────────┘                        │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌───────────────────────────────────────┐  │
//! │  │ CustomizationResult  │   │ CustomizationSummary                  │  │
//! │  │  one replacement     │   │  total + accepted + rejected          │  │
//! │  │  check               │   │  for a whole pizza                    │  │
//! │  └──────────────────────┘   └───────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON field names are camelCase to match the storefront's cart payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{decimal_string, Money};

// =============================================================================
// Topping Category
// =============================================================================

/// The category a topping belongs to.
///
/// Meat and cheese are priced as "premium" for replacement purposes.
/// Unknown category strings from the menu store are preserved in `Other`
/// rather than failing deserialization; the pricing engine refuses any
/// replacement involving them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToppingCategory {
    Vegetable,
    Meat,
    Cheese,
    Other(String),
}

impl ToppingCategory {
    /// The category names the engine knows how to price.
    pub const KNOWN: [&'static str; 3] = ["vegetable", "meat", "cheese"];

    pub fn as_str(&self) -> &str {
        match self {
            ToppingCategory::Vegetable => "vegetable",
            ToppingCategory::Meat => "meat",
            ToppingCategory::Cheese => "cheese",
            ToppingCategory::Other(other) => other,
        }
    }

    #[inline]
    pub fn is_vegetable(&self) -> bool {
        matches!(self, ToppingCategory::Vegetable)
    }

    /// Meat or cheese.
    #[inline]
    pub fn is_premium(&self) -> bool {
        matches!(self, ToppingCategory::Meat | ToppingCategory::Cheese)
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, ToppingCategory::Other(_))
    }
}

impl From<String> for ToppingCategory {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "vegetable" => ToppingCategory::Vegetable,
            "meat" => ToppingCategory::Meat,
            "cheese" => ToppingCategory::Cheese,
            _ => ToppingCategory::Other(value),
        }
    }
}

impl From<ToppingCategory> for String {
    fn from(category: ToppingCategory) -> Self {
        match category {
            ToppingCategory::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ToppingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Size Tier
// =============================================================================

/// One of the three price brackets a pizza size maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    /// Maps a free-text size label (`10"`, `Medium (12")`, `large`) to a tier.
    ///
    /// Case-insensitive substring matching, checked in order:
    /// - `10`, `small`, `9` → Small
    /// - `12`, `medium`, `11` → Medium
    /// - `14`, `large` → Large
    ///
    /// Anything else falls back to Medium. Menu configuration owns the labels,
    /// so an unexpected label prices at the middle tier instead of failing.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::SizeTier;
    ///
    /// assert_eq!(SizeTier::from_size_label("Small (10\")"), SizeTier::Small);
    /// assert_eq!(SizeTier::from_size_label("14\""), SizeTier::Large);
    /// assert_eq!(SizeTier::from_size_label("family"), SizeTier::Medium);
    /// ```
    pub fn from_size_label(label: &str) -> SizeTier {
        SizeTier::parse_strict(label).unwrap_or(SizeTier::Medium)
    }

    /// Same matching as [`SizeTier::from_size_label`] without the fallback.
    pub fn parse_strict(label: &str) -> Option<SizeTier> {
        let label = label.to_lowercase();
        let has_any = |needles: &[&str]| needles.iter().any(|n| label.contains(n));

        if has_any(&["10", "small", "9"]) {
            Some(SizeTier::Small)
        } else if has_any(&["12", "medium", "11"]) {
            Some(SizeTier::Medium)
        } else if has_any(&["14", "large"]) {
            Some(SizeTier::Large)
        } else {
            None
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeTier::Small => write!(f, "small"),
            SizeTier::Medium => write!(f, "medium"),
            SizeTier::Large => write!(f, "large"),
        }
    }
}

// =============================================================================
// Topping
// =============================================================================

/// A topping from the menu catalog.
///
/// Prices travel as decimal strings (`"1.50"`) so the menu store's exact
/// values survive JSON; in memory they are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Topping {
    pub id: String,

    /// Display name shown on the menu and in the cart.
    pub name: String,

    #[ts(type = "string")]
    pub category: ToppingCategory,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub small_price: Money,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub medium_price: Money,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub large_price: Money,
}

impl Topping {
    /// Returns the price for a size tier.
    #[inline]
    pub fn price_for(&self, tier: SizeTier) -> Money {
        match tier {
            SizeTier::Small => self.small_price,
            SizeTier::Medium => self.medium_price,
            SizeTier::Large => self.large_price,
        }
    }
}

// =============================================================================
// Topping Modification
// =============================================================================

/// What the customer did to a topping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ModificationKind {
    Add,
    Remove,
    Replace,
}

/// Which part of the pizza a modification applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PizzaHalf {
    #[default]
    Whole,
    Left,
    Right,
}

impl PizzaHalf {
    /// True for `Left` and `Right`.
    #[inline]
    pub fn is_split(&self) -> bool {
        !matches!(self, PizzaHalf::Whole)
    }
}

/// One customer edit to a pizza's toppings.
///
/// `replaced_topping` is only meaningful for `Replace`. Order matters when a
/// list of these is priced: the first accepted replacement takes the free
/// slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ToppingModification {
    #[serde(rename = "type")]
    pub kind: ModificationKind,

    pub topping: Topping,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub replaced_topping: Option<Topping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub half: Option<PizzaHalf>,
}

impl ToppingModification {
    pub fn add(topping: Topping) -> Self {
        ToppingModification {
            kind: ModificationKind::Add,
            topping,
            replaced_topping: None,
            half: None,
        }
    }

    pub fn remove(topping: Topping) -> Self {
        ToppingModification {
            kind: ModificationKind::Remove,
            topping,
            replaced_topping: None,
            half: None,
        }
    }

    /// Swap `replaced` for `topping`.
    pub fn replace(topping: Topping, replaced: Topping) -> Self {
        ToppingModification {
            kind: ModificationKind::Replace,
            topping,
            replaced_topping: Some(replaced),
            half: None,
        }
    }

    /// Targets this modification at one half of the pizza.
    pub fn on_half(mut self, half: PizzaHalf) -> Self {
        self.half = Some(half);
        self
    }

    /// The half this applies to; a missing value means the whole pizza.
    #[inline]
    pub fn target(&self) -> PizzaHalf {
        self.half.unwrap_or_default()
    }
}

// =============================================================================
// Customization Results
// =============================================================================

/// Outcome of checking a single topping replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationResult {
    pub is_valid: bool,

    /// Extra cost of the change. Zero when invalid.
    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub additional_charge: Money,

    /// Display-ready reason when `is_valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error_message: Option<String>,
}

impl CustomizationResult {
    pub fn valid(additional_charge: Money) -> Self {
        CustomizationResult {
            is_valid: true,
            additional_charge,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CustomizationResult {
            is_valid: false,
            additional_charge: Money::zero(),
            error_message: Some(message.into()),
        }
    }
}

/// A modification that was priced into the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedModification {
    /// Position in the submitted list.
    pub index: usize,
    pub modification: ToppingModification,

    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub charge: Money,
}

/// A modification that contributed nothing because it broke a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RejectedModification {
    /// Position in the submitted list.
    pub index: usize,
    pub modification: ToppingModification,
    pub reason: String,
}

/// Priced result for every modification on one pizza line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationSummary {
    /// Sum of all accepted charges.
    #[serde(with = "decimal_string")]
    #[ts(type = "string")]
    pub total: Money,
    pub accepted: Vec<AcceptedModification>,
    pub rejected: Vec<RejectedModification>,
    /// Replacement count after this list, including the starting count.
    pub replacements_used: u32,
}

impl CustomizationSummary {
    /// An empty summary whose replacement counter starts at `replacements_used`.
    pub fn starting_at(replacements_used: u32) -> Self {
        CustomizationSummary {
            replacements_used,
            ..Default::default()
        }
    }

    /// True when every modification was accepted.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Accepted modifications in submission order, without their charges.
    pub fn accepted_modifications(&self) -> Vec<ToppingModification> {
        self.accepted.iter().map(|a| a.modification.clone()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mushrooms() -> Topping {
        Topping {
            id: "mushrooms".to_string(),
            name: "Mushrooms".to_string(),
            category: ToppingCategory::Vegetable,
            small_price: Money::from_cents(100),
            medium_price: Money::from_cents(150),
            large_price: Money::from_cents(200),
        }
    }

    #[test]
    fn test_size_tier_matching() {
        assert_eq!(SizeTier::from_size_label("10\""), SizeTier::Small);
        assert_eq!(SizeTier::from_size_label("SMALL"), SizeTier::Small);
        assert_eq!(SizeTier::from_size_label("9 inch"), SizeTier::Small);
        assert_eq!(SizeTier::from_size_label("Medium (12\")"), SizeTier::Medium);
        assert_eq!(SizeTier::from_size_label("11\""), SizeTier::Medium);
        assert_eq!(SizeTier::from_size_label("14\""), SizeTier::Large);
        assert_eq!(SizeTier::from_size_label("Large"), SizeTier::Large);
    }

    #[test]
    fn test_size_tier_fallback_is_medium() {
        assert_eq!(SizeTier::from_size_label(""), SizeTier::Medium);
        assert_eq!(SizeTier::from_size_label("personal"), SizeTier::Medium);
        assert_eq!(SizeTier::parse_strict("personal"), None);
        assert_eq!(SizeTier::parse_strict("16\""), None);
    }

    /// Small patterns are checked first, so "19" reads as small.
    #[test]
    fn test_size_tier_small_patterns_win() {
        assert_eq!(SizeTier::from_size_label("19\""), SizeTier::Small);
        assert_eq!(SizeTier::from_size_label("Small or Large"), SizeTier::Small);
    }

    #[test]
    fn test_category_from_string() {
        assert_eq!(ToppingCategory::from("Meat".to_string()), ToppingCategory::Meat);
        assert_eq!(
            ToppingCategory::from("sauce".to_string()),
            ToppingCategory::Other("sauce".to_string())
        );
        assert!(ToppingCategory::Cheese.is_premium());
        assert!(!ToppingCategory::Vegetable.is_premium());
        assert!(!ToppingCategory::Other("sauce".to_string()).is_known());
    }

    #[test]
    fn test_topping_json_shape() {
        let json = r#"{
            "id": "pepperoni",
            "name": "Pepperoni",
            "category": "meat",
            "smallPrice": "1.50",
            "mediumPrice": "2.00",
            "largePrice": "2.50"
        }"#;
        let topping: Topping = serde_json::from_str(json).unwrap();
        assert_eq!(topping.category, ToppingCategory::Meat);
        assert_eq!(topping.price_for(SizeTier::Large).cents(), 250);

        let value = serde_json::to_value(&topping).unwrap();
        assert_eq!(value["mediumPrice"], "2.00");
        assert_eq!(value["category"], "meat");
    }

    #[test]
    fn test_modification_json_uses_type_key() {
        let modification = ToppingModification::add(mushrooms()).on_half(PizzaHalf::Left);
        let value = serde_json::to_value(&modification).unwrap();
        assert_eq!(value["type"], "add");
        assert_eq!(value["half"], "left");
        assert!(value.get("replacedTopping").is_none());
        assert_eq!(modification.target(), PizzaHalf::Left);
        assert_eq!(ToppingModification::remove(mushrooms()).target(), PizzaHalf::Whole);
    }

    #[test]
    fn test_customization_result_constructors() {
        let ok = CustomizationResult::valid(Money::from_cents(200));
        assert!(ok.is_valid);
        assert!(ok.error_message.is_none());

        let bad = CustomizationResult::invalid("nope");
        assert!(!bad.is_valid);
        assert!(bad.additional_charge.is_zero());
        assert_eq!(bad.error_message.as_deref(), Some("nope"));

        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["additionalCharge"], "2.00");
    }

    #[test]
    fn test_summary_json_uses_decimal_strings() {
        let summary = CustomizationSummary {
            total: Money::from_cents(150),
            accepted: vec![AcceptedModification {
                index: 0,
                modification: ToppingModification::add(mushrooms()),
                charge: Money::from_cents(150),
            }],
            rejected: Vec::new(),
            replacements_used: 0,
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total"], "1.50");
        assert_eq!(value["accepted"][0]["charge"], "1.50");

        let restored: CustomizationSummary = serde_json::from_value(value).unwrap();
        assert_eq!(restored, summary);
    }
}

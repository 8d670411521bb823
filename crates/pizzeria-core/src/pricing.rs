//! # Topping Pricing Engine
//!
//! Decides what a topping change costs and whether it is allowed.
//!
//! ## Replacement Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  replacements already used >= 1 ?                                       │
//! │      │                                                                  │
//! │      ├── yes ──► valid, charge = new topping's tier price               │
//! │      │                                                                  │
//! │      └── no (the free slot)                                             │
//! │            vegetable     → vegetable      valid, free                  │
//! │            meat/cheese   → meat/cheese    valid, free                  │
//! │            vegetable     → meat/cheese    valid, tier price            │
//! │            meat/cheese   → vegetable      INVALID (remove + add)       │
//! │            anything else                  INVALID                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adds are always charged at the tier price, removes are always free.
//!
//! ## Running Replacement Count
//! [`calculate_customization_total`] folds over the modifications in the order
//! the customer made them, carrying the replacement count in the accumulator.
//! Reordering the same list can move the free slot to a different swap.
//!
//! Every function here is pure: same input, same output.

use crate::money::Money;
use crate::types::{
    AcceptedModification, CustomizationResult, CustomizationSummary, ModificationKind,
    RejectedModification, SizeTier, Topping, ToppingCategory, ToppingModification,
};
use crate::FREE_REPLACEMENTS_PER_PIZZA;

/// Shown when a meat or cheese topping is swapped for a vegetable.
pub const PREMIUM_TO_VEGETABLE_MESSAGE: &str = "Meat and cheese toppings cannot be replaced with vegetables. \
     Please remove the topping and add the vegetable separately.";

/// Shown for category pairs the rules do not cover.
pub const INVALID_REPLACEMENT_MESSAGE: &str = "This topping replacement is not allowed.";

/// Shown when a replace modification does not say what it replaces.
pub const MISSING_REPLACED_TOPPING_MESSAGE: &str =
    "A replacement must name the topping being replaced.";

// =============================================================================
// Tier Prices
// =============================================================================

/// Price of `topping` on a pizza with the given size label.
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::pricing::get_topping_price;
/// use pizzeria_core::{Topping, ToppingCategory};
///
/// let olives = Topping {
///     id: "olives".into(),
///     name: "Olives".into(),
///     category: ToppingCategory::Vegetable,
///     small_price: Money::from_cents(100),
///     medium_price: Money::from_cents(150),
///     large_price: Money::from_cents(200),
/// };
///
/// assert_eq!(get_topping_price(&olives, "Small (10\")").cents(), 100);
/// assert_eq!(get_topping_price(&olives, "16\"").cents(), 150); // fallback
/// ```
pub fn get_topping_price(topping: &Topping, size: &str) -> Money {
    topping.price_for(SizeTier::from_size_label(size))
}

/// Charge for adding a topping. Adds have no free allowance.
pub fn calculate_add_topping_charge(topping: &Topping, size: &str) -> Money {
    get_topping_price(topping, size)
}

// =============================================================================
// Replacement Validation
// =============================================================================

/// Checks one replacement of `original` by `new` on a pizza of `size`.
///
/// `existing_replacements` is how many replacements on this pizza were
/// already accepted. The caller bumps its count only when the result is
/// valid.
pub fn validate_topping_replacement(
    original: &Topping,
    new: &Topping,
    size: &str,
    existing_replacements: u32,
) -> CustomizationResult {
    validate_replacement_at_tier(
        original,
        new,
        SizeTier::from_size_label(size),
        existing_replacements,
    )
}

/// [`validate_topping_replacement`] with the tier already resolved.
pub fn validate_replacement_at_tier(
    original: &Topping,
    new: &Topping,
    tier: SizeTier,
    existing_replacements: u32,
) -> CustomizationResult {
    let new_price = new.price_for(tier);

    if existing_replacements >= FREE_REPLACEMENTS_PER_PIZZA {
        return CustomizationResult::valid(new_price);
    }

    use ToppingCategory::{Cheese, Meat, Vegetable};
    match (&original.category, &new.category) {
        (Vegetable, Vegetable) => CustomizationResult::valid(Money::zero()),
        (Meat | Cheese, Meat | Cheese) => CustomizationResult::valid(Money::zero()),
        (Vegetable, Meat | Cheese) => CustomizationResult::valid(new_price),
        (Meat | Cheese, Vegetable) => CustomizationResult::invalid(PREMIUM_TO_VEGETABLE_MESSAGE),
        _ => CustomizationResult::invalid(INVALID_REPLACEMENT_MESSAGE),
    }
}

// =============================================================================
// Half-and-Half
// =============================================================================

/// Whether a pizza of `size` may be split into two independently topped
/// halves.
///
/// Gluten-free pizzas never split. Otherwise only medium and large labels
/// qualify (`12`, `medium`, `14`, `large`, case-insensitive).
pub fn can_split_pizza(size: &str, is_gluten_free: bool) -> bool {
    if is_gluten_free {
        return false;
    }

    let size = size.to_lowercase();
    ["12", "medium", "14", "large"]
        .iter()
        .any(|needle| size.contains(needle))
}

// =============================================================================
// Customization Total
// =============================================================================

/// Prices every modification on one pizza line.
///
/// Rejected replacements contribute nothing and are listed in
/// `summary.rejected` with their reason; the caller decides whether that
/// blocks checkout.
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::pricing::calculate_customization_total;
/// use pizzeria_core::{Topping, ToppingCategory, ToppingModification};
///
/// let topping = |id: &str, category, cents| Topping {
///     id: id.into(),
///     name: id.into(),
///     category,
///     small_price: Money::from_cents(cents),
///     medium_price: Money::from_cents(cents),
///     large_price: Money::from_cents(cents),
/// };
/// let ham = topping("ham", ToppingCategory::Meat, 200);
/// let peppers = topping("peppers", ToppingCategory::Vegetable, 100);
///
/// let summary = calculate_customization_total(
///     &[ToppingModification::replace(peppers, ham)],
///     "12\"",
///     0,
/// );
/// assert!(summary.total.is_zero());
/// assert_eq!(summary.rejected.len(), 1);
/// ```
pub fn calculate_customization_total(
    modifications: &[ToppingModification],
    size: &str,
    existing_replacements: u32,
) -> CustomizationSummary {
    customization_total_at_tier(
        modifications,
        SizeTier::from_size_label(size),
        existing_replacements,
    )
}

/// [`calculate_customization_total`] returning only the amount, for callers
/// that ignore rejected modifications.
pub fn calculate_customization_total_amount(
    modifications: &[ToppingModification],
    size: &str,
    existing_replacements: u32,
) -> Money {
    calculate_customization_total(modifications, size, existing_replacements).total
}

/// [`calculate_customization_total`] with the tier already resolved.
pub fn customization_total_at_tier(
    modifications: &[ToppingModification],
    tier: SizeTier,
    existing_replacements: u32,
) -> CustomizationSummary {
    modifications.iter().enumerate().fold(
        CustomizationSummary::starting_at(existing_replacements),
        |summary, (index, modification)| price_modification(summary, index, modification, tier),
    )
}

/// One step of the fold.
fn price_modification(
    mut summary: CustomizationSummary,
    index: usize,
    modification: &ToppingModification,
    tier: SizeTier,
) -> CustomizationSummary {
    let outcome = match modification.kind {
        ModificationKind::Add => Ok(modification.topping.price_for(tier)),
        ModificationKind::Remove => Ok(Money::zero()),
        ModificationKind::Replace => match &modification.replaced_topping {
            None => Err(MISSING_REPLACED_TOPPING_MESSAGE.to_string()),
            Some(original) => {
                let result = validate_replacement_at_tier(
                    original,
                    &modification.topping,
                    tier,
                    summary.replacements_used,
                );
                if result.is_valid {
                    summary.replacements_used = summary.replacements_used.saturating_add(1);
                    Ok(result.additional_charge)
                } else {
                    Err(result
                        .error_message
                        .unwrap_or_else(|| INVALID_REPLACEMENT_MESSAGE.to_string()))
                }
            }
        },
    };

    match outcome {
        Ok(charge) => {
            summary.total += charge;
            summary.accepted.push(AcceptedModification {
                index,
                modification: modification.clone(),
                charge,
            });
        }
        Err(reason) => summary.rejected.push(RejectedModification {
            index,
            modification: modification.clone(),
            reason,
        }),
    }

    summary
}

// =============================================================================
// Unit Tests
// =============================================================================

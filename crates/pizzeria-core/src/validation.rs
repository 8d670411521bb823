//! # Validation Module
//!
//! Input validation for the pricing engine's inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load                                                 │
//! │  └── validate_topping: ids, names, non-negative prices, categories     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart customization (THIS MODULE)                             │
//! │  ├── resolve_size_tier: strict or fallback size matching               │
//! │  ├── validate_modification_count                                       │
//! │  └── validate_half_targeting: split only where allowed                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing fold (pricing.rs)                                    │
//! │  └── replacement rules, reported as data, never as Err                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::can_split_pizza;
use crate::types::{SizeTier, Topping, ToppingCategory, ToppingModification};
use crate::MAX_PRICE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TOPPING_ID_LEN: usize = 64;
const MAX_TOPPING_NAME_LEN: usize = 100;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a catalog topping before it is used for pricing.
///
/// ## Rules
/// - id and name are non-empty and reasonably short
/// - category is vegetable, meat or cheese
/// - all three tier prices are between zero and [`MAX_PRICE`]
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::validation::validate_topping;
/// use pizzeria_core::{Topping, ToppingCategory};
///
/// let mut basil = Topping {
///     id: "basil".into(),
///     name: "Fresh Basil".into(),
///     category: ToppingCategory::Vegetable,
///     small_price: Money::from_cents(50),
///     medium_price: Money::from_cents(75),
///     large_price: Money::from_cents(100),
/// };
/// assert!(validate_topping(&basil).is_ok());
///
/// basil.large_price = Money::from_cents(-1);
/// assert!(validate_topping(&basil).is_err());
/// ```
pub fn validate_topping(topping: &Topping) -> ValidationResult<()> {
    validate_text("topping id", &topping.id, MAX_TOPPING_ID_LEN)?;
    validate_text("topping name", &topping.name, MAX_TOPPING_NAME_LEN)?;

    if !topping.category.is_known() {
        return Err(ValidationError::NotAllowed {
            field: "topping category".to_string(),
            allowed: ToppingCategory::KNOWN
                .iter()
                .map(|c| c.to_string())
                .collect(),
        });
    }

    validate_price("small price", topping.small_price)?;
    validate_price("medium price", topping.medium_price)?;
    validate_price("large price", topping.large_price)?;

    Ok(())
}

/// Validates that a price is between zero and [`MAX_PRICE`].
/// Zero is allowed (free topping).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::PriceOutOfRange {
            field: field.to_string(),
            max: MAX_PRICE,
        });
    }

    Ok(())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Pizza Line Validators
// =============================================================================

/// Resolves a size label to its tier.
///
/// With `strict` off this is [`SizeTier::from_size_label`] (medium fallback).
/// With `strict` on an unmatched label is an error.
pub fn resolve_size_tier(size: &str, strict: bool) -> CoreResult<SizeTier> {
    if size.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "size".to_string(),
        }
        .into());
    }

    if strict {
        SizeTier::parse_strict(size).ok_or_else(|| CoreError::UnknownSize(size.to_string()))
    } else {
        Ok(SizeTier::from_size_label(size))
    }
}

/// Validates the number of modifications on one pizza.
pub fn validate_modification_count(count: usize, max: usize) -> CoreResult<()> {
    if count > max {
        return Err(CoreError::TooManyModifications { max });
    }

    Ok(())
}

/// Refuses left/right modifications on pizzas that cannot be split.
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::validation::validate_half_targeting;
/// use pizzeria_core::{PizzaHalf, Topping, ToppingCategory, ToppingModification};
///
/// let ham = Topping {
///     id: "ham".into(),
///     name: "Ham".into(),
///     category: ToppingCategory::Meat,
///     small_price: Money::from_cents(150),
///     medium_price: Money::from_cents(200),
///     large_price: Money::from_cents(250),
/// };
/// let half_ham = [ToppingModification::add(ham).on_half(PizzaHalf::Left)];
///
/// assert!(validate_half_targeting(&half_ham, "14\"", false).is_ok());
/// assert!(validate_half_targeting(&half_ham, "10\"", false).is_err());
/// assert!(validate_half_targeting(&half_ham, "14\"", true).is_err());
/// ```
pub fn validate_half_targeting(
    modifications: &[ToppingModification],
    size: &str,
    is_gluten_free: bool,
) -> CoreResult<()> {
    let wants_split = modifications.iter().any(|m| m.target().is_split());

    if wants_split && !can_split_pizza(size, is_gluten_free) {
        return Err(CoreError::SplitNotAllowed {
            size: size.to_string(),
            gluten_free: is_gluten_free,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed `max`
pub fn validate_quantity(qty: i64, max: i64) -> ValidationResult<()> {
    if qty < 1 || qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

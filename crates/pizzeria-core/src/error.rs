//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizzeria-core errors (this file)                                      │
//! │  ├── CoreError        - Customization rule violations                  │
//! │  └── ValidationError  - Malformed reference data / input               │
//! │                                                                         │
//! │  pizzeria-cart errors (separate crate)                                 │
//! │  └── CartError        - Cart, catalog and payload failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → ErrorResponse         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that a rejected topping replacement is NOT an error here. The
//! pricing engine reports those as data (`CustomizationResult`,
//! `RejectedModification`) so the storefront can show the message.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Customization rule violations raised outside the pricing fold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Size label matched no tier while strict size matching is on.
    #[error("Unrecognized pizza size: '{0}'")]
    UnknownSize(String),

    /// A half-pizza modification was requested on a pizza that cannot split.
    ///
    /// ## When This Occurs
    /// - Gluten-free crust (never split)
    /// - Small size tier (halves too small to be a portion)
    #[error("Half-and-half is not available for size '{size}'{}", gluten_free_suffix(.gluten_free))]
    SplitNotAllowed { size: String, gluten_free: bool },

    /// Too many modifications on a single pizza.
    #[error("A pizza cannot have more than {max} topping changes")]
    TooManyModifications { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn gluten_free_suffix(gluten_free: &bool) -> &'static str {
    if *gluten_free {
        " (gluten-free)"
    } else {
        ""
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while loading reference data (topping catalog, prices) before any
/// pricing runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Price is negative or above the menu ceiling.
    #[error("{field} must be between $0.00 and {max}")]
    PriceOutOfRange { field: String, max: Money },

    /// Invalid format (e.g. a price that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. duplicate topping id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_error_message() {
        let err = ValidationError::PriceOutOfRange {
            field: "base price".to_string(),
            max: Money::from_cents(1_000_000),
        };
        assert_eq!(err.to_string(), "base price must be between $0.00 and $10000.00");
    }

    #[test]
    fn test_split_error_messages() {
        let err = CoreError::SplitNotAllowed {
            size: "10\"".to_string(),
            gluten_free: false,
        };
        assert_eq!(err.to_string(), "Half-and-half is not available for size '10\"'");

        let err = CoreError::SplitNotAllowed {
            size: "14\"".to_string(),
            gluten_free: true,
        };
        assert_eq!(
            err.to_string(),
            "Half-and-half is not available for size '14\"' (gluten-free)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "topping id".to_string(),
        };
        assert_eq!(err.to_string(), "topping id is required");

        let err = ValidationError::Duplicate {
            field: "topping id".to_string(),
            value: "pepperoni".to_string(),
        };
        assert_eq!(err.to_string(), "topping id 'pepperoni' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

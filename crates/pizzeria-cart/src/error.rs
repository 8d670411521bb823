//! # Cart Error Type
//!
//! Unified error type for cart operations, plus the serializable shape the
//! web layer returns to the storefront.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront                  Rust                                       │
//! │  ──────────                  ────                                       │
//! │                                                                         │
//! │  customize pizza ──► Cart::customize_line()                             │
//! │                            │                                            │
//! │        unknown topping? ───┼── CartError::ToppingNotFound ──┐           │
//! │        split on 10"?  ─────┼── CoreError::SplitNotAllowed ──┤           │
//! │        bad payload?   ─────┼── CartError::Json ─────────────┤           │
//! │                            │                                ▼           │
//! │                            │                         ErrorResponse      │
//! │  ◄─────────────────────────┴──────────── { code, message } ◄┘           │
//! │                                                                         │
//! │  Rejected topping swaps are NOT errors: they come back inside the      │
//! │  CustomizationSummary with a display-ready reason.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pizzeria_core::{CoreError, Money, ValidationError};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Errors from cart, catalog and payload operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Topping id is not in the catalog.
    #[error("Topping not found: {0}")]
    ToppingNotFound(String),

    /// Cart line id is not in the cart.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// Cart has reached its line limit.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// A stored payload's charge no longer matches its modifications.
    #[error("Stored topping charge {stored} does not match recomputed {recomputed}")]
    StalePayload { stored: Money, recomputed: Money },

    /// A stored payload was priced for a different pizza than its line.
    #[error("Customization payload does not match its line: {0}")]
    PayloadMismatch(String),

    /// Customization rule violation from the pricing engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed input data.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON that could not be parsed or produced.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Error codes for web responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Topping or cart line missing (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Customization rule broken (422)
    CustomizationError,

    /// Cart limit reached
    CartError,

    /// Stored or submitted payload unusable
    InvalidPayload,
}

/// What the storefront receives when a cart operation fails.
///
/// ```json
/// { "code": "CUSTOMIZATION_ERROR", "message": "Half-and-half is not available for size '10\"'" }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl CartError {
    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::ToppingNotFound(_) | CartError::LineNotFound(_) => ErrorCode::NotFound,
            CartError::CartTooLarge { .. } => ErrorCode::CartError,
            CartError::StalePayload { .. }
            | CartError::PayloadMismatch(_)
            | CartError::Json(_) => ErrorCode::InvalidPayload,
            CartError::Validation(_) | CartError::Core(CoreError::Validation(_)) => {
                ErrorCode::ValidationError
            }
            CartError::Core(_) => ErrorCode::CustomizationError,
        }
    }
}

impl From<&CartError> for ErrorResponse {
    fn from(err: &CartError) -> Self {
        if let CartError::Json(e) = err {
            tracing::error!(error = %e, "Customization payload JSON failure");
        }

        ErrorResponse {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Topping prices arrive from the menu store as decimal strings:         │
//! │    "1.10" + "2.20" as floats = 3.3000000000000003  ❌                  │
//! │                                                                         │
//! │  Summed across every line of a large order the error accumulates.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "1.10" → 110 cents, "2.20" → 220 cents, total 330 cents  ✅         │
//! │    Decimal strings exist ONLY at the JSON boundary and in display.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(250); // $2.50
//!
//! // Or parse the decimal string the catalog stores
//! let large: Money = "3.25".parse().unwrap();
//!
//! let total = price + large;
//! assert_eq!(total.to_decimal_string(), "5.75");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic saturates at the `i64` bounds instead of
///   panicking; validated prices stay far below them (see `MAX_PRICE`)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Serializes as integer cents. Fields that must cross the
///   wire as decimal strings use [`decimal_string`]
///
/// ## Where Money is Used
/// ```text
/// Topping.small/medium/large_price ──► tier price ──► modification charge
///                                                           │
/// CartLine.base_price ──┬─────────────────────────────────► line total
///                       └──► Displayed as "$12.99" in UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let price = Money::from_major_minor(2, 50); // $2.50
    /// assert_eq!(price.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal currency string such as `"12.99"`, `"3"` or `".5"`.
    ///
    /// ## Rules
    /// - Optional leading `-`, surrounding whitespace is ignored
    /// - Digits only, at most one `.`
    /// - More than two fraction digits are rounded half-up to the cent
    ///   (`"1.255"` → 126 cents)
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.99").unwrap().cents(), 1299);
    /// assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
    /// assert!(Money::parse_decimal("twelve").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", input, reason),
        };

        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must contain digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a decimal number such as 12.99"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| invalid("is too large"))?
        };

        let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = frac_digits.next().unwrap_or(0);
        let hundredths = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().map_or(0, |d| i64::from(d >= 5));

        let cents = whole_cents
            .checked_add(tenths * 10 + hundredths + round_up)
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1499); // $14.99
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2998);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats as a plain two-decimal string without currency symbol.
    ///
    /// This is the shape stored in catalogs and customization payloads.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).to_decimal_string(), "2.50");
    /// assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The cart layer formats with the configured
/// currency symbol for anything customer-facing.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Decimal String Serde Adapter
// =============================================================================

/// Serde adapter for fields stored as decimal strings (`"2.50"`).
///
/// Deserialization also accepts bare JSON numbers, which some menu exports
/// emit for whole-dollar prices.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "pizzeria_core::money::decimal_string")]
/// pub small_price: Money,
/// ```
pub mod decimal_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(f64),
    }

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&money.to_decimal_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => text,
            RawAmount::Number(number) => number.to_string(),
        };
        Money::parse_decimal(&text).map_err(D::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("2.50").unwrap().cents(), 250);
        assert_eq!(Money::parse_decimal(" 3 ").unwrap().cents(), 300);
        assert_eq!(Money::parse_decimal("1.").unwrap().cents(), 100);
        assert_eq!(Money::parse_decimal(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse_decimal("0.1").unwrap().cents(), 10);
        assert_eq!(Money::parse_decimal("-4.05").unwrap().cents(), -405);
    }

    #[test]
    fn test_parse_decimal_rounds_extra_digits_half_up() {
        assert_eq!(Money::parse_decimal("1.255").unwrap().cents(), 126);
        assert_eq!(Money::parse_decimal("1.254").unwrap().cents(), 125);
        assert_eq!(Money::parse_decimal("0.9999").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("$2.50").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_decimal_string_formatting() {
        assert_eq!(Money::from_cents(0).to_decimal_string(), "0.00");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.50");
    }

    /// 0.1 + 0.2 style drift cannot happen with cents.
    #[test]
    fn test_summing_decimal_prices_is_exact() {
        let total: Money = ["1.10", "2.20", "0.10", "0.20"]
            .iter()
            .map(|p| p.parse::<Money>().unwrap())
            .sum();
        assert_eq!(total.cents(), 360);
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_cents(1000);
        a += Money::from_cents(500);
        assert_eq!(a.cents(), 1500);
        assert_eq!((a * 3).cents(), 4500);
        assert_eq!(a.multiply_quantity(2).cents(), 3000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(90_000_000_000_000_000);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!((huge * 200).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let total: Money = [huge, huge, Money::from_cents(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_decimal_string_serde() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal_string")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price":"1.75"}"#).unwrap();
        assert_eq!(parsed.price.cents(), 175);

        let numeric: Priced = serde_json::from_str(r#"{"price":2.5}"#).unwrap();
        assert_eq!(numeric.price.cents(), 250);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"price":"1.75"}"#);

        assert!(serde_json::from_str::<Priced>(r#"{"price":"cheap"}"#).is_err());
    }
}

//! # Money Module
//!
//! Provides the `Money` type for unit prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pricing metadata stores unit prices in MINOR units (cents):           │
//! │    { "base_price_google": 1500 }   →  15.00                            │
//! │                                                                         │
//! │  The checkout host reports current prices as decimal strings:          │
//! │    { "amount": "15.0" }            →  1500 minor units                 │
//! │                                                                         │
//! │  Both end up as the same i64 so they compare exactly.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_pricing_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! assert_eq!(price.to_string(), "10.99");
//!
//! let current = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(current, price);
//! ```

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

/// Minor units per major unit. Every currency the storefront sells in
/// uses two decimal places.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Serialises as a bare integer, which is exactly what the
/// `fixedPricePerUnit.amount` field of a line update carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cart_pricing_core::money::Money;
    ///
    /// let price = Money::from_cents(1500);
    /// assert_eq!(price.cents(), 1500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal amount in major units ("19.99", "20", "-5.5").
    ///
    /// ## Rules
    /// - At most two significant fractional digits; trailing zeros beyond
    ///   that are accepted ("20.000")
    /// - No exponent, no thousands separators, no currency symbol
    ///
    /// Returns `None` for anything else. Nothing is rounded.
    ///
    /// ## Example
    /// ```rust
    /// use cart_pricing_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("20.0"), Some(Money::from_cents(2000)));
    /// assert_eq!(Money::parse_decimal("0.5"), Some(Money::from_cents(50)));
    /// assert_eq!(Money::parse_decimal("1.999"), None);
    /// assert_eq!(Money::parse_decimal("$1"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (major, fraction) = match unsigned.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (unsigned, ""),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // Digits past the second must be zeros, otherwise we would be rounding
        let (significant, rest) = fraction.split_at(fraction.len().min(2));
        if rest.bytes().any(|b| b != b'0') {
            return None;
        }

        let major: i64 = major.parse().ok()?;
        let minor: i64 = match significant.len() {
            0 => 0,
            1 => significant.parse::<i64>().ok()? * 10,
            _ => significant.parse().ok()?,
        };

        let cents = major.checked_mul(MINOR_PER_MAJOR)?.checked_add(minor)?;
        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount in major units with two decimals ("15.00").
///
/// ## Note
/// This is for logs. Currency symbols are the storefront's business.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        assert_eq!(Money::from_cents(1500).to_string(), "15.00");
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("20"), Some(Money::from_cents(2000)));
        assert_eq!(Money::parse_decimal("20.0"), Some(Money::from_cents(2000)));
        assert_eq!(Money::parse_decimal("19.99"), Some(Money::from_cents(1999)));
        assert_eq!(Money::parse_decimal(" 0.05 "), Some(Money::from_cents(5)));
        assert_eq!(Money::parse_decimal("12.500"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal("-5.5"), Some(Money::from_cents(-550)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal(".50"), None);
        assert_eq!(Money::parse_decimal("1.999"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("1,000.00"), None);
        assert_eq!(Money::parse_decimal("--1"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(1300)).unwrap();
        assert_eq!(json, "1300");
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  With floats:  0.1 + 0.2 = 0.30000000000000004  ❌                  │
//! │                                                                     │
//! │  OUR SOLUTION: integer centavos                                     │
//! │    R$ 10,99  ==  1099 centavos (i64)                                │
//! │    All arithmetic is exact; only display formats as decimals        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use balcao_core::money::Money;
//!
//! let price = Money::from_cents(1099); // R$ 10.99
//! let line = price * 3;                // R$ 32.97
//! assert_eq!(line.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections and discounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
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
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Subtracts a discount, flooring the result at zero.
    ///
    /// This is the totals rule of the whole system: a discount larger than
    /// the amount yields zero, never a negative total. A negative discount
    /// increases the amount.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(2500);
    /// assert_eq!(subtotal.less_discount(Money::from_cents(300)).cents(), 2200);
    /// assert_eq!(subtotal.less_discount(Money::from_cents(9999)).cents(), 0);
    /// ```
    #[inline]
    pub fn less_discount(&self, discount: Money) -> Money {
        Money((self.0 - discount.0).max(0))
    }

    /// Parses a decimal amount like `"12.34"`, `"12,34"` or `"-3"`.
    ///
    /// Accepts at most two fraction digits (a third digit makes the input
    /// invalid rather than silently truncated). Returns `None` on anything
    /// that is not a plain decimal number.
    pub fn parse(input: &str) -> Option<Money> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        // Comma is the decimal separator on Brazilian keyboards.
        let mut parts = digits.splitn(2, ['.', ',']);
        let whole = parts.next()?;
        let frac = parts.next().unwrap_or("");

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || frac.len() > 2 {
            return None;
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Parses a decimal amount, coercing anything unparsable to zero.
    ///
    /// Used for the discount entry field: a half-typed or garbage value
    /// must never abort the totals computation. This fallback is a
    /// deliberate, tested behavior, not an accident of error handling.
    pub fn parse_lenient(input: &str) -> Money {
        Money::parse(input).unwrap_or_default()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in receipt format (`R$ 10.99`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R$ {}.{:02}", sign, self.reais().abs(), self.cents_part())
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "R$ 10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "R$ 5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$ 5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "R$ 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(4).cents(), 4000);
    }

    #[test]
    fn test_less_discount_floors_at_zero() {
        let subtotal = Money::from_cents(2500);
        assert_eq!(subtotal.less_discount(Money::from_cents(300)).cents(), 2200);
        assert_eq!(subtotal.less_discount(Money::from_cents(2500)).cents(), 0);
        assert_eq!(subtotal.less_discount(Money::from_cents(9000)).cents(), 0);
        // Negative discount increases the total.
        assert_eq!(subtotal.less_discount(Money::from_cents(-100)).cents(), 2600);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(Money::parse("12.34"), Some(Money::from_cents(1234)));
        assert_eq!(Money::parse("12,34"), Some(Money::from_cents(1234)));
        assert_eq!(Money::parse("12"), Some(Money::from_cents(1200)));
        assert_eq!(Money::parse("12.5"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse(".50"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse("0.00"), Some(Money::zero()));
        assert_eq!(Money::parse("-3"), Some(Money::from_cents(-300)));
        assert_eq!(Money::parse(" 7.25 "), Some(Money::from_cents(725)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("1.2.3"), None);
        assert_eq!(Money::parse("12.345"), None);
        assert_eq!(Money::parse("R$ 5"), None);
        assert_eq!(Money::parse("-"), None);
        assert_eq!(Money::parse("."), None);
    }

    #[test]
    fn test_parse_lenient_coerces_to_zero() {
        assert_eq!(Money::parse_lenient("garbage"), Money::zero());
        assert_eq!(Money::parse_lenient(""), Money::zero());
        assert_eq!(Money::parse_lenient("3.00"), Money::from_cents(300));
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].iter().map(|&c| Money::from_cents(c)).sum();
        assert_eq!(total.cents(), 400);
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All monetary values in Kardex are integer cents. The database, the
//! calculations and the reports all use cents; only the CLI converts to a
//! `$10.99`-style string for display and parses it back on input.
//!
//! ## Usage
//! ```rust
//! use kardex_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // $21.98
//! let total = price + Money::from_cents(500);  // $15.99
//!
//! // Parse user input
//! let parsed: Money = "10.99".parse().unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that aggregate arithmetic can pass through negative
/// intermediate values; persisted prices are validated non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use kardex_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion as an absolute value (0-99).
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
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Arithmetic Operators
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

// =============================================================================
// Display & Parsing
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-${}.{:02}", -self.dollars(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

/// Error returned when a money string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid money amount '{0}' (expected e.g. 10 or 10.99)")]
pub struct ParseMoneyError(String);

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `"10"`, `"10.9"`, `"10.99"`, with an optional leading `$`
    /// or `-`, into exact cents. No floating point on the way.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let err = || ParseMoneyError(raw.to_string());

        let (negative, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(err());
        }

        let (major_str, minor_str) = match rest.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (rest, None),
        };

        let major: i64 = major_str.parse().map_err(|_| err())?;
        if major < 0 {
            // A second sign after the leading one, e.g. "--5".
            return Err(err());
        }
        let minor: i64 = match minor_str {
            None => 0,
            Some(m) if m.len() == 1 => m.parse::<i64>().map_err(|_| err())? * 10,
            Some(m) if m.len() == 2 => m.parse().map_err(|_| err())?,
            Some(_) => return Err(err()),
        };
        if minor < 0 {
            return Err(err());
        }

        let cents = major * 100 + minor;
        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

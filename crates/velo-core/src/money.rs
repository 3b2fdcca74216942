//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Compounding rules in floating point:                                   │
//! │    160.00 × 1.10 = 176.00000000000003  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    16000 cents × 11000 / 10000 = 17600 cents                           │
//! │    Each percentage step rounds to a whole cent, explicitly             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use velo_core::money::{Money, Percentage};
//!
//! let subtotal = Money::from_cents(16000); // $160.00
//! let total = subtotal.apply_percentage(Percentage::from_bps(1000)); // +10%
//! assert_eq!(total.cents(), 17600);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.base_price ──┐                                                 │
/// │                       ├──► base total ──► rule adjustments ──► total    │
/// │  PartOption.price ────┘        (Σ)          (compounding)               │
/// │                                                                         │
/// │  PartOption.price ──► rule adjustments ──► live per-option price        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use velo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use velo_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(120).cents(), 12000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
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

    /// Multiplies the amount by `(1 + pct/100)`, rounding to the nearest
    /// cent (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use velo_core::money::{Money, Percentage};
    ///
    /// let total = Money::from_cents(999);
    /// // 999 × 1.05 = 1048.95 → 1049
    /// assert_eq!(total.apply_percentage(Percentage::from_bps(500)).cents(), 1049);
    /// // 999 × 0.90 = 899.1 → 899
    /// assert_eq!(total.apply_percentage(Percentage::from_bps(-1000)).cents(), 899);
    /// ```
    pub fn apply_percentage(&self, pct: Percentage) -> Money {
        // i128 keeps large catalog totals from overflowing during the multiply
        let numerator = self.0 as i128 * (10_000 + pct.bps() as i128);
        Money::from_cents(round_div(numerator, 10_000) as i64)
    }
}

/// Integer division rounding half away from zero.
fn round_div(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage adjustment represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = +10% and -500 bps = -5%.
/// Negative values are discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(i32);

impl Percentage {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from whole percent points (10 → 10%).
    #[inline]
    pub const fn from_percent(pct: i32) -> Self {
        Percentage(pct * 100)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }

    /// Returns the value as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format (debugging and CLI output).
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

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}%", self.percent())
    }
}

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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

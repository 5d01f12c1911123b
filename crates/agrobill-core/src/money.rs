//! # Money Module
//!
//! Monetary values and GST rates on exact decimal arithmetic.
//!
//! Catalog rates carry two-decimal semantics, but the inclusive-GST base
//! recovery (`rate / (1 + gst/100)`) does not stay on a two-decimal grid,
//! so amounts accumulate unrounded and are fixed to two decimals only at
//! presentation or transmission time via [`Money::to_fixed`].
//!
//! ## Usage
//! ```rust
//! use agrobill_core::money::{GstRate, Money};
//! use rust_decimal::Decimal;
//!
//! let rate = Money::new(Decimal::new(11800, 2)); // ₹118.00, GST included
//! let gst = GstRate::from_percent(Decimal::from(18)).unwrap();
//!
//! // Recover the tax-exclusive base: 118 / 1.18 = 100
//! let base = rate.base_from_inclusive(gst);
//! assert_eq!(base, Money::new(Decimal::from(100)));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees.
///
/// Single-field tuple struct over [`Decimal`]: arithmetic between amounts
/// is exact, and nothing is rounded until [`Money::to_fixed`] is called at
/// the presentation boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount, unrounded.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Fixes the value to exactly two decimal places for display or
    /// transmission.
    ///
    /// Rounds half away from zero (₹0.825 becomes ₹0.83) and pads to two
    /// digits, so `236` crosses the wire as `236.00`.
    ///
    /// ## Example
    /// ```rust
    /// use agrobill_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(825, 3)); // 0.825
    /// assert_eq!(m.to_fixed().to_string(), "0.83");
    /// ```
    pub fn to_fixed(&self) -> Decimal {
        let mut fixed = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        fixed.rescale(2);
        fixed
    }

    /// Calculates the GST due on a tax-exclusive amount.
    ///
    /// ## Example
    /// ```rust
    /// use agrobill_core::money::{GstRate, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let base = Money::new(Decimal::from(200));
    /// let gst = GstRate::from_percent(Decimal::from(18)).unwrap();
    /// assert_eq!(base.calculate_gst(gst), Money::new(Decimal::from(36)));
    /// ```
    pub fn calculate_gst(&self, rate: GstRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Recovers the tax-exclusive base from a tax-inclusive amount.
    ///
    /// The divisor `1 + gst/100` is at least 1 because [`GstRate`] only
    /// admits percentages in 0–100.
    pub fn base_from_inclusive(&self, rate: GstRate) -> Money {
        Money(self.0 / rate.divisor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging and terminal output; the frontend formats for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}₹{:.2}", sign, self.0.abs())
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

/// Multiplication by a quantity (whole or fractional).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate as a percentage in 0–100.
///
/// Constructed only through [`GstRate::from_percent`], which rejects
/// out-of-range input. That keeps the inclusive-convention divisor
/// `1 + pct/100` strictly positive: a rate of −100 never reaches the
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GstRate(Decimal);

impl GstRate {
    /// Creates a GST rate from a percentage, validating 0–100.
    pub fn from_percent(pct: Decimal) -> Result<Self, ValidationError> {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "gst_percentage".to_string(),
                min: Decimal::ZERO,
                max: Decimal::ONE_HUNDRED,
            });
        }
        Ok(GstRate(pct))
    }

    /// Zero GST rate (exempt goods).
    #[inline]
    pub const fn zero() -> Self {
        GstRate(Decimal::ZERO)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (18% → 0.18).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns the inclusive-price divisor `1 + pct/100`.
    #[inline]
    pub fn divisor(&self) -> Decimal {
        Decimal::ONE + self.fraction()
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.50));

        assert_eq!((a + b).amount(), dec!(15.50));
        assert_eq!((a - b).amount(), dec!(4.50));
        assert_eq!((a * dec!(3)).amount(), dec!(30.00));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(dec!(10.99))), "₹10.99");
        assert_eq!(format!("{}", Money::new(dec!(5))), "₹5.00");
        assert_eq!(format!("{}", Money::new(dec!(-5.5))), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(Money::new(dec!(236)).to_fixed().to_string(), "236.00");
        assert_eq!(Money::new(dec!(0.825)).to_fixed().to_string(), "0.83");
        assert_eq!(Money::new(dec!(0.824)).to_fixed().to_string(), "0.82");
    }

    #[test]
    fn test_calculate_gst_exclusive() {
        let base = Money::new(dec!(200));
        let rate = GstRate::from_percent(dec!(18)).unwrap();
        assert_eq!(base.calculate_gst(rate).amount(), dec!(36));
    }

    #[test]
    fn test_base_from_inclusive() {
        // ₹118 with 18% GST folded in: base ₹100, GST ₹18
        let rate = Money::new(dec!(118));
        let gst = GstRate::from_percent(dec!(18)).unwrap();
        let base = rate.base_from_inclusive(gst);
        assert_eq!(base.amount(), dec!(100));
        assert_eq!((rate - base).amount(), dec!(18));
    }

    #[test]
    fn test_gst_rate_bounds() {
        assert!(GstRate::zero().is_zero());
        assert!(GstRate::from_percent(dec!(0)).is_ok());
        assert!(GstRate::from_percent(dec!(18)).is_ok());
        assert!(GstRate::from_percent(dec!(100)).is_ok());

        assert!(GstRate::from_percent(dec!(-0.01)).is_err());
        assert!(GstRate::from_percent(dec!(100.01)).is_err());
        // the divide-by-zero input for the inclusive formula
        assert!(GstRate::from_percent(dec!(-100)).is_err());
    }

    #[test]
    fn test_gst_rate_fraction_and_divisor() {
        let rate = GstRate::from_percent(dec!(18)).unwrap();
        assert_eq!(rate.fraction(), dec!(0.18));
        assert_eq!(rate.divisor(), dec!(1.18));
        assert_eq!(format!("{}", rate), "18%");
    }
}

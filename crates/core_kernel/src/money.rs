//! Ledger amounts and percentage rates
//!
//! This module provides the monetary value types of the engine. All ledger
//! arithmetic is carried out in whole currency units on signed integers: a
//! positive amount is owed, a negative amount is retained credit. Percentage
//! rates (premium floors, write-off thresholds) are backed by rust_decimal
//! and always truncate toward zero when applied to an amount.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,
}

/// A signed ledger amount in whole currency units
///
/// Positive values represent debt (owed to the insurer), negative values
/// represent credit (overpayment retained on the contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition
    pub fn checked_add(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by an integer factor, saturating at the numeric bounds
    pub fn saturating_mul(&self, factor: i64) -> Amount {
        Amount(self.0.saturating_mul(factor))
    }

    /// Divides into `n` equal shares, dropping the remainder
    pub fn split(&self, n: usize) -> Amount {
        Amount(self.0 / n as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Represents a percentage rate (e.g., a premium floor or damage threshold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.02 for 2%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.02 for 2%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 2.0 for 2%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Applies this rate to an amount, truncating the result toward zero
    pub fn of_trunc(&self, amount: Amount) -> Result<Amount, MoneyError> {
        let product = Decimal::from(amount.value()) * self.value;
        product
            .trunc()
            .to_i64()
            .map(Amount::new)
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.value * dec!(100)).round_dp(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_arithmetic() {
        let a = Amount::new(100);
        let b = Amount::new(30);

        assert_eq!((a + b).value(), 130);
        assert_eq!((a - b).value(), 70);
        assert_eq!((-a).value(), -100);
    }

    #[test]
    fn test_amount_signs() {
        assert!(Amount::new(1).is_positive());
        assert!(Amount::new(-1).is_negative());
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::ZERO.is_positive());
    }

    #[test]
    fn test_amount_split_drops_remainder() {
        assert_eq!(Amount::new(300).split(3), Amount::new(100));
        assert_eq!(Amount::new(301).split(2), Amount::new(150));
    }

    #[test]
    fn test_rate_of_trunc() {
        let floor = Rate::from_percentage(dec!(2));
        assert_eq!(floor.of_trunc(Amount::new(10000)).unwrap(), Amount::new(200));
        assert_eq!(floor.of_trunc(Amount::new(10049)).unwrap(), Amount::new(200));

        let threshold = Rate::from_percentage(dec!(70));
        assert_eq!(threshold.of_trunc(Amount::new(10001)).unwrap(), Amount::new(7000));
    }

    #[test]
    fn test_checked_overflow() {
        let max = Amount::new(i64::MAX);
        assert_eq!(max.checked_add(Amount::new(1)), Err(MoneyError::Overflow));
        assert!(max.checked_sub(Amount::new(1)).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn split_never_exceeds_total(
            total in 0i64..1_000_000_000i64,
            parts in 1usize..100usize
        ) {
            let amount = Amount::new(total);
            let share = amount.split(parts);

            prop_assert!(share.saturating_mul(parts as i64) <= amount);
            prop_assert!((amount - share.saturating_mul(parts as i64)).value() < parts as i64);
        }

        #[test]
        fn rate_of_trunc_is_bounded(value in 0i64..1_000_000_000i64) {
            let rate = Rate::from_percentage(rust_decimal_macros::dec!(70));
            let applied = rate.of_trunc(Amount::new(value)).unwrap();

            prop_assert!(applied <= Amount::new(value));
            prop_assert!(applied >= Amount::ZERO);
        }
    }
}

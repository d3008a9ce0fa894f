//! Money type for marketplace amounts.
//!
//! Amounts are stored as integer cents so pricing math stays exact; values
//! only become floating point at display and percentage boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// An amount of money, in cents.
///
/// The marketplace operates in a single currency, so no currency tag is
/// carried. Negative amounts are legal (option price deltas, adjustments).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Money = Money(0);

    /// Create from a cent amount.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Create from a dollar amount, rounding to the nearest cent.
    ///
    /// ```
    /// use plaza::money::Money;
    /// assert_eq!(Money::from_dollars(12.99).cents(), 1299);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    /// The raw cent amount.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Convert to a dollar value.
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// A percentage of this amount, rounded to the nearest cent.
    pub fn percent(&self, percent: f64) -> Money {
        Money((self.0 as f64 * percent / 100.0).round() as i64)
    }

    /// The smaller of two amounts.
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }
}

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

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars() {
        assert_eq!(Money::from_dollars(12.99).cents(), 1299);
        assert_eq!(Money::from_dollars(6.0).cents(), 600);
        assert_eq!(Money::from_dollars(-3.50).cents(), -350);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1299).to_string(), "$12.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-150).to_string(), "-$1.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((b * 3).cents(), 750);
        assert_eq!((-b).cents(), -250);
    }

    #[test]
    fn test_percent_rounds_to_nearest_cent() {
        // 8.75% of $40.98 is 358.575 cents.
        assert_eq!(Money::from_cents(4098).percent(8.75).cents(), 359);
        assert_eq!(Money::from_cents(10000).percent(20.0).cents(), 2000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].map(Money::from_cents).into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_min() {
        let cap = Money::from_cents(1500);
        assert_eq!(Money::from_cents(2000).min(cap), cap);
        assert_eq!(Money::from_cents(1000).min(cap).cents(), 1000);
    }
}

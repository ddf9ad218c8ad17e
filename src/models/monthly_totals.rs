//! Fixed 12-slot vector of monthly amounts
//!
//! One slot per calendar month, index 0 = January. The fixed-size array makes
//! the "always exactly 12 elements" invariant a property of the type, and
//! every instance carries its own backing storage.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

use super::money::Money;

/// Number of slots in a [`MonthlyTotals`]
pub const MONTHS_PER_YEAR: usize = 12;

/// A year's worth of per-month amounts, index 0 = January
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyTotals([Money; MONTHS_PER_YEAR]);

impl MonthlyTotals {
    /// Create an all-zero totals vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the amount for a month (0-based index, 0 = January)
    ///
    /// # Panics
    ///
    /// Panics if `month0 >= 12`.
    pub fn month(&self, month0: usize) -> Money {
        self.0[month0]
    }

    /// Add an amount into a month's slot (0-based index)
    ///
    /// # Panics
    ///
    /// Panics if `month0 >= 12`.
    pub fn add_to_month(&mut self, month0: usize, amount: Money) {
        self.0[month0] += amount;
    }

    /// Sum of all 12 slots
    pub fn total(&self) -> Money {
        self.0.iter().copied().sum()
    }

    /// Iterate over the 12 slots in calendar order
    pub fn iter(&self) -> impl Iterator<Item = Money> + '_ {
        self.0.iter().copied()
    }

    /// Check whether every slot is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Money::is_zero)
    }
}

impl Add for MonthlyTotals {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for MonthlyTotals {
    fn add_assign(&mut self, other: Self) {
        for (slot, amount) in self.0.iter_mut().zip(other.0) {
            *slot += amount;
        }
    }
}

impl Sub for MonthlyTotals {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        for (slot, amount) in self.0.iter_mut().zip(other.0) {
            *slot -= amount;
        }
        self
    }
}

impl Neg for MonthlyTotals {
    type Output = Self;

    fn neg(mut self) -> Self {
        for slot in self.0.iter_mut() {
            *slot = -*slot;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        let totals = MonthlyTotals::new();
        assert!(totals.is_zero());
        assert_eq!(totals.iter().count(), MONTHS_PER_YEAR);
        assert_eq!(totals.total(), Money::zero());
    }

    #[test]
    fn test_add_to_month() {
        let mut totals = MonthlyTotals::new();
        totals.add_to_month(1, Money::from_cents(4550));
        totals.add_to_month(1, Money::from_cents(1000));

        assert_eq!(totals.month(1), Money::from_cents(5550));
        assert_eq!(totals.month(0), Money::zero());
        assert_eq!(totals.total(), Money::from_cents(5550));
    }

    #[test]
    fn test_instances_do_not_share_storage() {
        let mut a = MonthlyTotals::new();
        let b = MonthlyTotals::new();
        a.add_to_month(0, Money::from_cents(100));

        assert_eq!(b.month(0), Money::zero());
    }

    #[test]
    fn test_arithmetic() {
        let mut a = MonthlyTotals::new();
        a.add_to_month(0, Money::from_cents(100));
        let mut b = MonthlyTotals::new();
        b.add_to_month(0, Money::from_cents(50));
        b.add_to_month(11, Money::from_cents(25));

        let sum = a + b;
        assert_eq!(sum.month(0), Money::from_cents(150));
        assert_eq!(sum.month(11), Money::from_cents(25));

        let diff = a - b;
        assert_eq!(diff.month(0), Money::from_cents(50));
        assert_eq!(diff.month(11), Money::from_cents(-25));

        let negated = -a;
        assert_eq!(negated.month(0), Money::from_cents(-100));
    }

    #[test]
    #[should_panic]
    fn test_month_out_of_range_panics() {
        let totals = MonthlyTotals::new();
        totals.month(12);
    }
}

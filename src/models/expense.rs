//! Expense transaction model
//!
//! One row of a year's expenses file. A row whose category equals the
//! reserved `"Initial Balance"` label is a sentinel carrying the year's
//! opening balance rather than a spendable transaction.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Timestamp format written to disk
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format written to disk
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Instant the record was entered
    pub timestamp: NaiveDateTime,

    /// Category name, or the Initial Balance sentinel label
    pub category: String,

    /// Calendar date the expense applies to
    pub expense_date: NaiveDate,

    /// Transaction amount
    pub amount: Money,

    /// Free-form description
    pub description: String,
}

impl ExpenseRecord {
    /// Reserved category label for the opening-balance sentinel row
    pub const INITIAL_BALANCE: &'static str = "Initial Balance";

    pub fn new(
        timestamp: NaiveDateTime,
        category: impl Into<String>,
        expense_date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            category: category.into(),
            expense_date,
            amount,
            description: description.into(),
        }
    }

    /// Build the sentinel row carrying a year's opening balance
    pub fn initial_balance(timestamp: NaiveDateTime, year_start: NaiveDate, amount: Money) -> Self {
        Self::new(
            timestamp,
            Self::INITIAL_BALANCE,
            year_start,
            amount,
            Self::INITIAL_BALANCE,
        )
    }

    /// Whether this row is the opening-balance sentinel
    pub fn is_initial_balance(&self) -> bool {
        self.category == Self::INITIAL_BALANCE
    }

    /// 0-based month index of the expense date (0 = January)
    pub fn month0(&self) -> usize {
        self.expense_date.month0() as usize
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.category,
            self.expense_date.format(DATE_FORMAT),
            self.amount,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 2, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            Money::from_cents(4550),
            "lunch",
        )
    }

    #[test]
    fn test_month0() {
        assert_eq!(sample().month0(), 1);
    }

    #[test]
    fn test_initial_balance_sentinel() {
        let record = ExpenseRecord::initial_balance(
            sample().timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Money::from_cents(50000),
        );
        assert!(record.is_initial_balance());
        assert_eq!(record.category, "Initial Balance");
        assert_eq!(record.description, "Initial Balance");
        assert!(!sample().is_initial_balance());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "2024-02-10 09:00:00 | Groceries | 2024-02-10 | 45.50 | lunch"
        );
    }
}

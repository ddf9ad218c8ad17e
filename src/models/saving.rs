//! Savings balance model
//!
//! One row of the per-user savings file. A record at rest always holds a
//! strictly positive balance; driving a balance to zero deletes the record
//! instead of storing it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{StoreError, StoreResult};

/// A savings position: one category's balance within an account bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingRecord {
    /// Category name, unique within the savings ledger
    pub category: String,

    /// Grouping bucket, normalized to trimmed lowercase
    pub account: String,

    /// Current balance, always > 0
    pub balance: Money,
}

impl SavingRecord {
    /// Create a record, validating the balance invariant
    ///
    /// The category name is trimmed; the account name is trimmed and
    /// lowercased.
    pub fn new(
        category: impl Into<String>,
        account: impl Into<String>,
        balance: Money,
    ) -> StoreResult<Self> {
        let category = category.into().trim().to_string();
        let account = account.into().trim().to_lowercase();

        if balance <= Money::zero() {
            return Err(StoreError::Validation(format!(
                "Saving record {}/{} cannot have balance <= 0.00",
                category, account
            )));
        }

        Ok(Self {
            category,
            account,
            balance,
        })
    }
}

impl fmt::Display for SavingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.account, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_names() {
        let record = SavingRecord::new(" Vacation ", " Bank A ", Money::from_cents(10000)).unwrap();
        assert_eq!(record.category, "Vacation");
        assert_eq!(record.account, "bank a");
    }

    #[test]
    fn test_rejects_non_positive_balance() {
        let zero = SavingRecord::new("Vacation", "bank", Money::zero());
        assert!(zero.unwrap_err().is_validation());

        let negative = SavingRecord::new("Vacation", "bank", Money::from_cents(-100));
        assert!(negative.unwrap_err().is_validation());
    }
}

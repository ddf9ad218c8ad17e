//! Savings ledger: per-user balances, independent of calendar year
//!
//! The by-category map is the single authoritative index; the by-account
//! view and the per-account totals are derived from it on demand, so the two
//! can never diverge when duplicate categories appear under different
//! accounts. Duplicate category rows in the file merge at load time by
//! summing their balances (the first row's account wins).

use std::collections::HashMap;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::{Money, SavingRecord};

use super::codec::{read_records, rewrite};
use super::file_io::DbFile;

/// A user's savings positions, keyed by category
#[derive(Debug)]
pub struct SavingsLedger {
    db: DbFile,
    by_category: HashMap<String, SavingRecord>,
    // Category insertion order; drives file order and derived views.
    order: Vec<String>,
}

impl SavingsLedger {
    /// Load the savings ledger, creating an empty file on first use
    pub fn load(db: DbFile) -> StoreResult<Self> {
        if !db.exists() {
            db.create()?;
        }

        let rows: Vec<SavingRecord> = read_records(&db)?;

        let mut ledger = Self {
            db,
            by_category: HashMap::new(),
            order: Vec::new(),
        };

        for record in rows {
            match ledger.by_category.get_mut(&record.category) {
                Some(existing) => existing.balance += record.balance,
                None => {
                    ledger.order.push(record.category.clone());
                    ledger.by_category.insert(record.category.clone(), record);
                }
            }
        }

        debug!(
            file = %ledger.db.path().display(),
            positions = ledger.order.len(),
            "loaded savings ledger"
        );
        Ok(ledger)
    }

    /// Look up one position by category
    pub fn get(&self, category: &str) -> Option<&SavingRecord> {
        self.by_category.get(category.trim())
    }

    /// All positions in insertion order
    pub fn records(&self) -> Vec<&SavingRecord> {
        self.order
            .iter()
            .map(|category| &self.by_category[category])
            .collect()
    }

    /// Positions grouped by account, accounts in first-appearance order
    pub fn get_by_account(&self) -> Vec<(String, Vec<&SavingRecord>)> {
        let mut accounts: Vec<(String, Vec<&SavingRecord>)> = Vec::new();
        for record in self.records() {
            match accounts.iter_mut().find(|(name, _)| *name == record.account) {
                Some((_, records)) => records.push(record),
                None => accounts.push((record.account.clone(), vec![record])),
            }
        }
        accounts
    }

    /// Total balance per account, accounts in first-appearance order
    pub fn get_account_totals(&self) -> Vec<(String, Money)> {
        self.get_by_account()
            .into_iter()
            .map(|(account, records)| {
                let total = records.iter().map(|r| r.balance).sum();
                (account, total)
            })
            .collect()
    }

    /// Open a new position
    ///
    /// Returns `Ok(false)` without touching anything if the category already
    /// exists. The account defaults to the category name; the balance must
    /// be strictly positive.
    pub fn add(&mut self, category: &str, account: Option<&str>, amount: Money) -> StoreResult<bool> {
        let category = category.trim();
        if self.by_category.contains_key(category) {
            return Ok(false);
        }

        let record = SavingRecord::new(category, account.unwrap_or(category), amount)?;
        self.order.push(record.category.clone());
        self.by_category.insert(record.category.clone(), record);
        Ok(true)
    }

    /// Update a position's balance and/or account
    ///
    /// With an amount: opens the position if absent, otherwise replaces the
    /// stored balance; a negative amount is rejected and a zero amount
    /// closes the position. With an account: moves the position into that
    /// account bucket. Both may be given in one call; neither makes the call
    /// a no-op.
    pub fn update(
        &mut self,
        category: &str,
        account: Option<&str>,
        amount: Option<Money>,
    ) -> StoreResult<()> {
        let category = category.trim();

        if let Some(amount) = amount {
            if !self.add(category, account, amount)? {
                self.update_balance(category, amount)?;
            }
        }

        if let Some(account) = account {
            self.update_account(category, account);
        }

        Ok(())
    }

    fn update_balance(&mut self, category: &str, amount: Money) -> StoreResult<()> {
        if amount.is_negative() {
            return Err(StoreError::Validation(
                "End balance of the savings category cannot be less than 0".into(),
            ));
        }

        if amount.is_zero() {
            // Zero closes the position; zero balances are never stored.
            self.by_category.remove(category);
            self.order.retain(|c| c != category);
        } else if let Some(record) = self.by_category.get_mut(category) {
            record.balance = amount;
        }

        Ok(())
    }

    fn update_account(&mut self, category: &str, account: &str) {
        if let Some(record) = self.by_category.get_mut(category) {
            record.account = account.trim().to_lowercase();
        }
    }

    /// Persist all positions, grouped by account then within-account
    /// insertion order, through a backup-protected full rewrite
    pub fn store(&self) -> StoreResult<()> {
        let rows: Vec<SavingRecord> = self
            .get_by_account()
            .into_iter()
            .flat_map(|(_, records)| records)
            .cloned()
            .collect();

        rewrite(&self.db, &rows)
    }
}

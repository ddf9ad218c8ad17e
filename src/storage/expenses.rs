//! Expense ledger: one user-year's transactions
//!
//! Loading streams every row through the codec, folds amounts into
//! per-category monthly totals, and captures the Initial Balance sentinel as
//! the year's opening balance. Append and rewrite are backup-protected; an
//! interrupted write leaves the file either fully updated or back at its
//! pre-operation bytes.

use std::collections::HashMap;

use tracing::debug;

use crate::error::StoreResult;
use crate::models::{ExpenseRecord, Money, MonthlyTotals};

use super::codec::{guarded_append, read_records, rewrite};
use super::file_io::DbFile;

/// A year's expense transactions, indexed by category
#[derive(Debug)]
pub struct ExpenseLedger {
    db: DbFile,
    opening_balance: Money,
    records: Vec<ExpenseRecord>,
    by_category: HashMap<String, Vec<usize>>,
    monthly_totals: HashMap<String, MonthlyTotals>,
}

impl ExpenseLedger {
    /// Load a year's ledger from disk
    ///
    /// Fails with `NotFound` if the file does not exist; a single malformed
    /// row aborts the whole load.
    pub fn load(db: DbFile) -> StoreResult<Self> {
        let rows: Vec<ExpenseRecord> = read_records(&db)?;

        let mut ledger = Self {
            db,
            opening_balance: Money::zero(),
            records: Vec::with_capacity(rows.len()),
            by_category: HashMap::new(),
            monthly_totals: HashMap::new(),
        };

        for record in rows {
            if record.is_initial_balance() {
                ledger.opening_balance = record.amount;
                continue;
            }

            let index = ledger.records.len();
            ledger
                .by_category
                .entry(record.category.clone())
                .or_default()
                .push(index);
            ledger
                .monthly_totals
                .entry(record.category.clone())
                .or_default()
                .add_to_month(record.month0(), record.amount);
            ledger.records.push(record);
        }

        debug!(
            file = %ledger.db.path().display(),
            transactions = ledger.records.len(),
            "loaded expense ledger"
        );
        Ok(ledger)
    }

    /// The year's opening balance, taken from the sentinel row
    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// All transactions in file order (the sentinel row excluded)
    pub fn get_expenses(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Transactions of one category, in file order
    pub fn get_expenses_by_category(&self, category: &str) -> Vec<&ExpenseRecord> {
        self.by_category
            .get(category)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Per-category monthly totals
    pub fn get_expenses_by_category_monthly_totals(&self) -> &HashMap<String, MonthlyTotals> {
        &self.monthly_totals
    }

    /// Append transactions to a year's file
    ///
    /// The file must already exist (`NotFound` otherwise, nothing is
    /// created). The append is backup-protected: on any write failure the
    /// pre-operation bytes are restored before the error is re-raised.
    pub fn insert(db: &DbFile, records: &[ExpenseRecord]) -> StoreResult<()> {
        guarded_append(db, records)
    }

    /// Replace a year's file with the given transactions
    ///
    /// Backup-protected full rewrite, used for bulk edits of the whole
    /// year's table.
    pub fn store(db: &DbFile, records: &[ExpenseRecord]) -> StoreResult<()> {
        rewrite(db, records)
    }
}

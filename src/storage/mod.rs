//! Storage layer for flatledger
//!
//! CSV-file record stores with backup-protected rewrites. The [`Store`] is a
//! per-user handle constructed once and passed by reference into request
//! handlers; every load reconstructs ledgers and registries from disk, so no
//! state is shared across requests.

pub mod categories;
pub mod codec;
pub mod expenses;
pub mod file_io;
pub mod savings;

pub use categories::CategoryRegistry;
pub use codec::Record;
pub use expenses::ExpenseLedger;
pub use file_io::DbFile;
pub use savings::SavingsLedger;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::paths::UserPaths;
use crate::error::{StoreError, StoreResult};
use crate::models::{ExpenseRecord, Money};

/// Per-user handle over one user's ledger files
///
/// No operation holds state across calls; every accessor reconstructs its
/// ledger or registry from disk.
#[derive(Debug, Clone)]
pub struct Store {
    paths: UserPaths,
}

impl Store {
    /// Create a store over one user's directory layout
    pub fn new(paths: UserPaths) -> Self {
        Self { paths }
    }

    /// The underlying path layout
    pub fn paths(&self) -> &UserPaths {
        &self.paths
    }

    /// Handle on a year's expenses file
    pub fn expenses_file(&self, year: i32) -> DbFile {
        DbFile::new(self.paths.expenses_file(year))
    }

    /// Handle on a year's category registry file
    pub fn categories_file(&self, year: i32) -> DbFile {
        DbFile::new(self.paths.categories_file(year))
    }

    /// Handle on the user's savings file
    pub fn savings_file(&self) -> DbFile {
        DbFile::new(self.paths.savings_file())
    }

    /// Load a year's expense ledger
    pub fn expenses(&self, year: i32) -> StoreResult<ExpenseLedger> {
        ExpenseLedger::load(self.expenses_file(year))
    }

    /// Load a year's category registry
    pub fn categories(&self, year: i32) -> StoreResult<CategoryRegistry> {
        CategoryRegistry::load(self.categories_file(year))
    }

    /// Load the user's savings ledger
    pub fn savings(&self) -> StoreResult<SavingsLedger> {
        SavingsLedger::load(self.savings_file())
    }

    /// Years with an expenses file, sorted ascending
    ///
    /// Scans the user directory for numeric subdirectory names; a missing
    /// user directory yields an empty list.
    pub fn available_years(&self) -> Vec<i32> {
        let entries = match std::fs::read_dir(self.paths.user_dir()) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut years: Vec<i32> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_string_lossy().parse::<i32>().ok())
            .filter(|&year| self.expenses_file(year).exists())
            .collect();
        years.sort_unstable();
        years
    }

    /// Create a year's expenses file, seeded with the opening-balance
    /// sentinel row dated January 1 of that year
    ///
    /// Fails with `AlreadyExists` if the year's file is already present and
    /// with a validation error if the year does not form a valid date.
    pub fn create_year_expenses(&self, year: i32, opening_balance: Money) -> StoreResult<()> {
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| StoreError::Validation(format!("Year number looks odd: {}", year)))?;

        let db = self.expenses_file(year);
        db.create()?;

        let sentinel = ExpenseRecord::initial_balance(
            chrono::Local::now().naive_local(),
            year_start,
            opening_balance,
        );
        codec::append_records(&db, &[sentinel])?;

        debug!(year, "created expense ledger");
        Ok(())
    }

    /// Create a year's category registry file
    ///
    /// Empty when no template year is given; otherwise a byte-copy of the
    /// template year's registry file.
    pub fn create_year_categories(&self, year: i32, template_year: Option<i32>) -> StoreResult<()> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(StoreError::Validation(format!(
                "Year number looks odd: {}",
                year
            )));
        }

        let db = self.categories_file(year);
        match template_year {
            None => db.create()?,
            Some(template) => {
                if db.exists() {
                    return Err(StoreError::AlreadyExists(db.path().display().to_string()));
                }
                db.copy_from(&self.paths.categories_file(template))?;
            }
        }

        debug!(year, ?template_year, "created category registry");
        Ok(())
    }
}

//! Core data models for flatledger
//!
//! The typed records stored in the CSV files (expenses, categories, savings
//! balances) and the value types they are built from.

pub mod category;
pub mod expense;
pub mod money;
pub mod monthly_totals;
pub mod saving;

pub use category::{CategoryRecord, CategoryType};
pub use expense::{ExpenseRecord, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use money::Money;
pub use monthly_totals::{MonthlyTotals, MONTHS_PER_YEAR};
pub use saving::SavingRecord;

//! flatledger - flat-file household expense ledger storage
//!
//! This library persists a household's financial records (expense
//! transactions, category taxonomies, and savings balances) as
//! comma-delimited files, one set per user per year, and derives the
//! monthly/yearly summaries a presentation layer displays.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution for the per-user, per-year file layout
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, savings, money)
//! - `storage`: CSV file storage with backup-protected rewrites
//! - `reports`: Aggregated monthly/yearly balances
//!
//! HTTP routing, form handling, authentication, and templating are external
//! collaborators: they construct a [`storage::Store`] per user, call its
//! read/write API, and render what it returns.
//!
//! # Example
//!
//! ```rust,ignore
//! use flatledger::config::DataPaths;
//! use flatledger::reports::YearSummary;
//! use flatledger::storage::Store;
//!
//! let store = Store::new(DataPaths::new()?.user_paths("alice"));
//! let summary = YearSummary::generate(&store.expenses(2024)?, &store.categories(2024)?);
//! ```
//!
//! # Durability model
//!
//! Rewrites are protected by a byte-copy backup restored on write failure.
//! That guards against application-level failures, not process or power
//! failure mid-copy, and no file locking is applied: callers must serialize
//! writers per user externally.

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use models::{
    CategoryRecord, CategoryType, ExpenseRecord, Money, MonthlyTotals, SavingRecord,
};
pub use reports::YearSummary;
pub use storage::{CategoryRegistry, DbFile, ExpenseLedger, SavingsLedger, Store};

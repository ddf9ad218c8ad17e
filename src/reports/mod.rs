//! Aggregated views derived from the record stores

pub mod year_summary;

pub use year_summary::{CategorySummary, TypeSummary, YearSummary};

//! Configuration for flatledger
//!
//! Currently limited to path resolution; the store itself carries no other
//! process-wide settings.

pub mod paths;

pub use paths::{DataPaths, UserPaths};

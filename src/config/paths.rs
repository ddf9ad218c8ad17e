//! Path management for flatledger
//!
//! Resolves the base data directory and the per-user, per-year file layout:
//!
//! ```text
//! <base>/<user>/savings.csv
//! <base>/<user>/<year>/expenses.csv
//! <base>/<user>/<year>/categories.csv
//! ```
//!
//! ## Base directory resolution order
//!
//! 1. `FLATLEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/flatledger` or `~/.config/flatledger`
//! 3. Windows: `%APPDATA%\flatledger`

use std::path::PathBuf;

use crate::error::StoreResult;

/// File name of a year's expense transactions
pub const EXPENSES_FILE_NAME: &str = "expenses.csv";

/// File name of a year's category registry
pub const CATEGORIES_FILE_NAME: &str = "categories.csv";

/// File name of a user's savings ledger
pub const SAVINGS_FILE_NAME: &str = "savings.csv";

/// Base data directory holding one subdirectory per user
#[derive(Debug, Clone)]
pub struct DataPaths {
    base_dir: PathBuf,
}

impl DataPaths {
    /// Resolve the base directory from the environment
    pub fn new() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the base directory through an injected variable lookup
    ///
    /// `new()` passes the process environment; tests pass a closure so they
    /// never mutate process-global state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let base_dir = match lookup("FLATLEDGER_DATA_DIR") {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path(&lookup)?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The base data directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// One user's directory under the base
    pub fn user_dir(&self, user: &str) -> PathBuf {
        self.base_dir.join(user)
    }

    /// One user's file layout
    pub fn user_paths(&self, user: &str) -> UserPaths {
        UserPaths::new(self.user_dir(user))
    }
}

/// The file layout of a single user's directory
#[derive(Debug, Clone)]
pub struct UserPaths {
    user_dir: PathBuf,
}

impl UserPaths {
    /// Wrap a user directory
    pub fn new(user_dir: PathBuf) -> Self {
        Self { user_dir }
    }

    /// The user's directory
    pub fn user_dir(&self) -> &PathBuf {
        &self.user_dir
    }

    /// A year's subdirectory
    pub fn year_dir(&self, year: i32) -> PathBuf {
        self.user_dir.join(year.to_string())
    }

    /// Path to a year's expenses file
    pub fn expenses_file(&self, year: i32) -> PathBuf {
        self.year_dir(year).join(EXPENSES_FILE_NAME)
    }

    /// Path to a year's category registry file
    pub fn categories_file(&self, year: i32) -> PathBuf {
        self.year_dir(year).join(CATEGORIES_FILE_NAME)
    }

    /// Path to the user's savings file
    pub fn savings_file(&self) -> PathBuf {
        self.user_dir.join(SAVINGS_FILE_NAME)
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path(lookup: &impl Fn(&str) -> Option<String>) -> StoreResult<PathBuf> {
    use crate::error::StoreError;

    let config_base = match lookup("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = lookup("HOME")
                .ok_or_else(|| StoreError::Io("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("flatledger"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path(lookup: &impl Fn(&str) -> Option<String>) -> StoreResult<PathBuf> {
    use crate::error::StoreError;

    let appdata = lookup("APPDATA")
        .ok_or_else(|| StoreError::Io("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("flatledger"))
}

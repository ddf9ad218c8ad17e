//! File primitive underlying every ledger file
//!
//! `DbFile` wraps one on-disk path together with its sibling backup path
//! (`<name>.bak`). Backup and restore are plain byte copies, so they protect
//! against application-level failures during a rewrite, not against a crash
//! mid-copy. Destructive rewrites must call `backup()` first and `restore()`
//! on failure.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Suffix appended to a file's name to form its backup path
pub const BACKUP_FILE_SUFFIX: &str = ".bak";

/// One ledger file plus its backup sibling
#[derive(Debug, Clone)]
pub struct DbFile {
    path: PathBuf,
    backup_path: PathBuf,
}

impl DbFile {
    /// Wrap a path; the backup path is derived by appending `.bak`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut backup = path.clone().into_os_string();
        backup.push(BACKUP_FILE_SUFFIX);

        Self {
            path,
            backup_path: PathBuf::from(backup),
        }
    }

    /// The wrapped path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The backup sibling path
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// File name component, used to tag parse errors
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Whether the file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file empty, creating parent directories as needed
    ///
    /// Fails with `AlreadyExists` if the path already holds a file.
    pub fn create(&self) -> StoreResult<()> {
        if self.exists() {
            return Err(StoreError::AlreadyExists(self.path.display().to_string()));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        File::create(&self.path)?;
        Ok(())
    }

    /// Truncate the file to zero bytes
    ///
    /// Fails with `NotFound` if the file does not exist.
    pub fn erase(&self) -> StoreResult<()> {
        if !self.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }

        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(())
    }

    /// Byte-copy the current file to its backup sibling
    pub fn backup(&self) -> StoreResult<()> {
        if !self.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }

        fs::copy(&self.path, &self.backup_path)?;
        Ok(())
    }

    /// Erase the current file (ignoring a missing file) and byte-copy the
    /// backup over it
    ///
    /// Fails with `NotFound` if no backup exists.
    pub fn restore(&self) -> StoreResult<()> {
        if !self.backup_path.exists() {
            return Err(StoreError::NotFound(self.backup_path.display().to_string()));
        }

        match self.erase() {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        warn!(file = %self.path.display(), "restoring from backup");
        fs::copy(&self.backup_path, &self.path)?;
        Ok(())
    }

    /// Byte-copy another file over this path
    ///
    /// Used to seed a year's registry from a template year. Fails with
    /// `NotFound` if the source does not exist.
    pub fn copy_from(&self, src: &Path) -> StoreResult<()> {
        if !src.exists() {
            return Err(StoreError::NotFound(src.display().to_string()));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(src, &self.path)?;
        Ok(())
    }
}

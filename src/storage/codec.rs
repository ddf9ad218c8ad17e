//! Row codec: typed records to and from delimited lines
//!
//! Each record type declares its column count and labels through the
//! [`Record`] trait; the free functions here stream whole files through the
//! csv reader/writer. A row whose field count does not match the declared
//! arity aborts the entire load with a parse error naming the file and the
//! 1-based line. Blank lines are skipped but still advance the line counter,
//! so reported line numbers match the file exactly.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::expense::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::models::{CategoryRecord, ExpenseRecord, Money, SavingRecord};

use super::file_io::DbFile;

/// A fixed-arity row type
pub trait Record: Sized {
    /// Ordered column labels; the length fixes the row arity
    const COLUMNS: &'static [&'static str];

    /// Decode one row; the error is a human-readable reason, located by the
    /// caller
    fn from_row(row: &StringRecord) -> Result<Self, String>;

    /// Encode the record in fixed field order
    fn to_row(&self) -> Vec<String>;
}

/// Read every row of the file into typed records
///
/// Fails with `NotFound` if the file is missing; a single malformed row
/// aborts the whole load.
pub fn read_records<R: Record>(db: &DbFile) -> StoreResult<Vec<R>> {
    if !db.exists() {
        return Err(StoreError::NotFound(db.path().display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(db.path())?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() != R::COLUMNS.len() {
            return Err(StoreError::parse(
                db.file_name(),
                line,
                format!(
                    "read {} columns, expected {}",
                    row.len(),
                    R::COLUMNS.len()
                ),
            ));
        }

        let record =
            R::from_row(&row).map_err(|reason| StoreError::parse(db.file_name(), line, reason))?;
        records.push(record);
    }

    debug!(file = %db.path().display(), rows = records.len(), "loaded records");
    Ok(records)
}

/// Append serialized rows to the end of the file
///
/// Fails with `NotFound` if the file is missing. If the file's final byte is
/// not a newline, one is inserted first so the appended row cannot
/// concatenate onto an unterminated last line.
pub fn append_records<R: Record>(db: &DbFile, records: &[R]) -> StoreResult<()> {
    if !db.exists() {
        return Err(StoreError::NotFound(db.path().display().to_string()));
    }

    ensure_trailing_newline(db)?;

    let file = OpenOptions::new().append(true).open(db.path())?;
    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush().map_err(|e| StoreError::Io(e.to_string()))?;
    Ok(())
}

/// Backup-protected append
///
/// On any write failure the backup is copied back before the write error is
/// re-raised, so callers observe either full success or an unchanged file.
pub fn guarded_append<R: Record>(db: &DbFile, records: &[R]) -> StoreResult<()> {
    if !db.exists() {
        return Err(StoreError::NotFound(db.path().display().to_string()));
    }

    db.backup()?;
    match append_records(db, records) {
        Ok(()) => Ok(()),
        Err(write_error) => Err(roll_back(db, write_error)),
    }
}

/// Backup-protected full rewrite
///
/// `backup()`, `erase()`, write every record; on failure the backup is copied
/// back before the write error is re-raised.
pub fn rewrite<R: Record>(db: &DbFile, records: &[R]) -> StoreResult<()> {
    db.backup()?;
    let written = db.erase().and_then(|()| append_records(db, records));
    match written {
        Ok(()) => Ok(()),
        Err(write_error) => Err(roll_back(db, write_error)),
    }
}

/// Restore the backup after a failed write, surfacing a restore failure as
/// its own, more severe error
fn roll_back(db: &DbFile, write_error: StoreError) -> StoreError {
    match db.restore() {
        Ok(()) => write_error,
        Err(restore_error) => StoreError::RestoreFailed {
            file: db.file_name(),
            write_error: write_error.to_string(),
            restore_error: restore_error.to_string(),
        },
    }
}

fn ensure_trailing_newline(db: &DbFile) -> StoreResult<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(db.path())?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    // Space-separated is the written form; T-separated ISO-8601 occurs in
    // older data files.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn parse_amount(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

impl Record for ExpenseRecord {
    const COLUMNS: &'static [&'static str] =
        &["Timestamp", "Category", "Expense date", "Amount", "Description"];

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        Ok(Self {
            timestamp: parse_timestamp(&row[0])?,
            category: row[1].to_string(),
            expense_date: parse_date(&row[2])?,
            amount: parse_amount(&row[3])?,
            description: row[4].to_string(),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.category.clone(),
            self.expense_date.format(DATE_FORMAT).to_string(),
            self.amount.to_string(),
            self.description.clone(),
        ]
    }
}

impl Record for CategoryRecord {
    const COLUMNS: &'static [&'static str] = &["Category", "Category type"];

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        let category_type = row[1].trim().parse()?;
        Ok(Self::new(row[0].trim(), category_type))
    }

    fn to_row(&self) -> Vec<String> {
        vec![self.category.clone(), self.category_type.to_string()]
    }
}

impl Record for SavingRecord {
    const COLUMNS: &'static [&'static str] = &["Category", "Account", "Balance"];

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        let balance = parse_amount(&row[2])?;
        SavingRecord::new(&row[0], &row[1], balance).map_err(|e| e.to_string())
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            self.account.clone(),
            self.balance.to_string(),
        ]
    }
}

//! Category registry: one user-year's taxonomy
//!
//! Maps category names to their type. Loading builds a by-name index (last
//! write wins on a duplicate name, first insertion position retained) and a
//! by-type index in registry order. Inserts are first-write-wins and persist
//! through a backup-protected full rewrite.

use std::collections::HashMap;

use tracing::debug;

use crate::error::StoreResult;
use crate::models::{CategoryRecord, CategoryType};

use super::codec::{read_records, rewrite};
use super::file_io::DbFile;

/// A year's registered categories
#[derive(Debug)]
pub struct CategoryRegistry {
    db: DbFile,
    records: Vec<CategoryRecord>,
    by_name: HashMap<String, usize>,
    by_type: HashMap<CategoryType, Vec<usize>>,
}

impl CategoryRegistry {
    /// Load a year's registry from disk
    ///
    /// Fails with `NotFound` if the file does not exist; an unrecognized
    /// type aborts the load as a parse error.
    pub fn load(db: DbFile) -> StoreResult<Self> {
        let rows: Vec<CategoryRecord> = read_records(&db)?;

        let mut registry = Self {
            db,
            records: Vec::with_capacity(rows.len()),
            by_name: HashMap::new(),
            by_type: HashMap::new(),
        };

        for record in rows {
            match registry.by_name.get(&record.category) {
                // Last write wins, keeping the first insertion position.
                Some(&index) => registry.records[index] = record,
                None => {
                    registry
                        .by_name
                        .insert(record.category.clone(), registry.records.len());
                    registry.records.push(record);
                }
            }
        }
        registry.rebuild_by_type();

        debug!(
            file = %registry.db.path().display(),
            categories = registry.records.len(),
            "loaded category registry"
        );
        Ok(registry)
    }

    fn rebuild_by_type(&mut self) {
        self.by_type.clear();
        for (index, record) in self.records.iter().enumerate() {
            self.by_type
                .entry(record.category_type)
                .or_default()
                .push(index);
        }
    }

    /// All records in insertion order
    pub fn get_categories(&self) -> &[CategoryRecord] {
        &self.records
    }

    /// Look up one category by name
    pub fn get(&self, category: &str) -> Option<&CategoryRecord> {
        self.by_name.get(category).map(|&index| &self.records[index])
    }

    /// Whether a category name is registered
    pub fn contains(&self, category: &str) -> bool {
        self.by_name.contains_key(category)
    }

    /// Category names of one type, in registry order
    pub fn lookup_by_type(&self, category_type: CategoryType) -> Vec<&str> {
        self.by_type
            .get(&category_type)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| self.records[i].category.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Register a category, persisting the full current set
    ///
    /// First-write-wins: if the name is already registered this is a no-op
    /// returning `Ok(false)` and nothing is written. Otherwise the extended
    /// set is rewritten backup-protected; the in-memory indices only pick up
    /// the record once the rewrite has succeeded, so a failed persist leaves
    /// the instance matching the file.
    pub fn insert_category(&mut self, record: CategoryRecord) -> StoreResult<bool> {
        if self.contains(&record.category) {
            return Ok(false);
        }

        let mut rows = self.records.clone();
        rows.push(record.clone());
        rewrite(&self.db, &rows)?;

        let index = self.records.len();
        self.by_name.insert(record.category.clone(), index);
        self.by_type
            .entry(record.category_type)
            .or_default()
            .push(index);
        self.records.push(record);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn db_with(dir: &TempDir, content: &str) -> DbFile {
        let db = DbFile::new(dir.path().join("categories.csv"));
        fs::write(db.path(), content).unwrap();
        db
    }

    #[test]
    fn test_load_trims_and_normalizes_type_case() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, " Groceries , needs\nSalary,INCOME\n");

        let registry = CategoryRegistry::load(db).unwrap();
        let records = registry.get_categories();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "Groceries");
        assert_eq!(records[0].category_type, CategoryType::Needs);
        assert_eq!(records[1].category_type, CategoryType::Income);
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Groceries,Needs\nWeird,Luxuries\n");

        let err = CategoryRegistry::load(db).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("categories.csv:2"));
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Groceries,Needs\nRent,Needs\nGroceries,Wants\n");

        let registry = CategoryRegistry::load(db).unwrap();
        let records = registry.get_categories();

        assert_eq!(records.len(), 2);
        // First insertion position retained, latest type kept.
        assert_eq!(records[0].category, "Groceries");
        assert_eq!(records[0].category_type, CategoryType::Wants);
        assert_eq!(registry.lookup_by_type(CategoryType::Needs), vec!["Rent"]);
        assert_eq!(
            registry.lookup_by_type(CategoryType::Wants),
            vec!["Groceries"]
        );
    }

    #[test]
    fn test_lookup_by_type_preserves_registry_order() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Rent,Needs\nGroceries,Needs\nCinema,Wants\n");

        let registry = CategoryRegistry::load(db).unwrap();
        assert_eq!(
            registry.lookup_by_type(CategoryType::Needs),
            vec!["Rent", "Groceries"]
        );
        assert!(registry.lookup_by_type(CategoryType::Income).is_empty());
    }

    #[test]
    fn test_insert_category_persists() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Groceries,Needs\n");

        let mut registry = CategoryRegistry::load(db.clone()).unwrap();
        let inserted = registry
            .insert_category(CategoryRecord::new("Salary", CategoryType::Income))
            .unwrap();
        assert!(inserted);

        let reloaded = CategoryRegistry::load(db).unwrap();
        assert_eq!(reloaded.get_categories().len(), 2);
        assert_eq!(
            reloaded.get("Salary").unwrap().category_type,
            CategoryType::Income
        );
    }

    #[test]
    fn test_insert_category_idempotent() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Groceries,Needs\n");

        let mut registry = CategoryRegistry::load(db.clone()).unwrap();
        assert!(registry
            .insert_category(CategoryRecord::new("Salary", CategoryType::Income))
            .unwrap());

        let after_first = fs::read_to_string(db.path()).unwrap();

        // Second insert with the same name is a no-op and writes nothing.
        assert!(!registry
            .insert_category(CategoryRecord::new("Salary", CategoryType::Wants))
            .unwrap());

        assert_eq!(fs::read_to_string(db.path()).unwrap(), after_first);
        assert_eq!(registry.get_categories().len(), 2);
        assert_eq!(
            registry.get("Salary").unwrap().category_type,
            CategoryType::Income
        );
    }

    #[test]
    fn test_failed_persist_leaves_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let db = db_with(&dir, "Groceries,Needs\n");
        let mut registry = CategoryRegistry::load(db.clone()).unwrap();

        // Replace the file with a directory so the rewrite fails before
        // anything is written.
        fs::remove_file(db.path()).unwrap();
        fs::create_dir(db.path()).unwrap();

        let result = registry.insert_category(CategoryRecord::new("Salary", CategoryType::Income));
        assert!(result.is_err());

        // The instance still matches the last successfully persisted set.
        assert!(!registry.contains("Salary"));
        assert_eq!(registry.get_categories().len(), 1);
        assert!(registry.lookup_by_type(CategoryType::Income).is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let db = DbFile::new(dir.path().join("categories.csv"));

        assert!(CategoryRegistry::load(db).unwrap_err().is_not_found());
    }
}

//! Category taxonomy models
//!
//! A category belongs to exactly one type out of a closed set. The type is an
//! explicit field on the stored record; classification never happens by
//! scanning membership lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of category types
///
/// The type determines the sign applied during aggregation: `Income` counts
/// positive, everything else counts negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    Savings,
    Wants,
    Needs,
    Income,
}

impl CategoryType {
    /// All types in display order
    pub const ALL: [CategoryType; 4] = [Self::Savings, Self::Wants, Self::Needs, Self::Income];

    /// Title-case name, the on-disk spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Wants => "Wants",
            Self::Needs => "Needs",
            Self::Income => "Income",
        }
    }

    /// Sign applied to this type's amounts during aggregation
    pub fn sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            _ => -1,
        }
    }
}

impl FromStr for CategoryType {
    type Err = String;

    /// Parse a type name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for t in Self::ALL {
            if s.eq_ignore_ascii_case(t.as_str()) {
                return Ok(t);
            }
        }
        Err(format!(
            "Invalid category type '{}'. Valid only {:?}",
            s,
            Self::ALL.map(|t| t.as_str())
        ))
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a year's category registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Category name, unique within a year's registry
    pub category: String,

    /// The type this category belongs to
    pub category_type: CategoryType,
}

impl CategoryRecord {
    /// Create a new category record, trimming the name
    pub fn new(category: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            category: category.into().trim().to_string(),
            category_type,
        }
    }
}

impl fmt::Display for CategoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.category_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("savings".parse::<CategoryType>(), Ok(CategoryType::Savings));
        assert_eq!("WANTS".parse::<CategoryType>(), Ok(CategoryType::Wants));
        assert_eq!(" Needs ".parse::<CategoryType>(), Ok(CategoryType::Needs));
        assert_eq!("income".parse::<CategoryType>(), Ok(CategoryType::Income));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("Bills".parse::<CategoryType>().is_err());
        // The sentinel label is a pseudo-type reserved for expense rows,
        // never assignable to a category record.
        assert!("Initial Balance".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_display_title_case() {
        assert_eq!(CategoryType::Needs.to_string(), "Needs");
        assert_eq!(CategoryType::Income.to_string(), "Income");
    }

    #[test]
    fn test_sign() {
        assert_eq!(CategoryType::Income.sign(), 1);
        assert_eq!(CategoryType::Needs.sign(), -1);
        assert_eq!(CategoryType::Wants.sign(), -1);
        assert_eq!(CategoryType::Savings.sign(), -1);
    }

    #[test]
    fn test_record_trims_name() {
        let record = CategoryRecord::new("  Groceries ", CategoryType::Needs);
        assert_eq!(record.category, "Groceries");
    }
}

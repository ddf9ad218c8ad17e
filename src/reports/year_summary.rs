//! Yearly summary: signed monthly and yearly balances
//!
//! Combines an expense ledger's per-category monthly totals with the
//! category registry. Every registered category appears even with no
//! activity; grouping uses the registry's authoritative type field, and each
//! type contributes with its sign (Income positive, everything else
//! negative).

use std::collections::HashMap;

use crate::models::{CategoryType, Money, MonthlyTotals};
use crate::storage::{CategoryRegistry, ExpenseLedger};

/// One category's raw (unsigned) monthly totals
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub name: String,
    pub totals: MonthlyTotals,
}

/// One category type's signed contribution to the year
#[derive(Debug, Clone)]
pub struct TypeSummary {
    pub category_type: CategoryType,

    /// Categories of this type in registry order, raw totals
    pub categories: Vec<CategorySummary>,

    /// Signed monthly balance contributed by this type
    pub monthly_balance: MonthlyTotals,

    /// Signed yearly total contributed by this type
    pub year_total: Money,
}

/// A full year's aggregated view for one user
#[derive(Debug, Clone)]
pub struct YearSummary {
    /// One summary per category type, in [`CategoryType::ALL`] order
    pub by_type: Vec<TypeSummary>,

    /// Signed balance per month across all types
    pub monthly_balance: MonthlyTotals,

    /// Opening balance plus the sum of all signed monthly balances
    pub current_balance: Money,
}

impl YearSummary {
    /// Aggregate a year's ledger against its registry
    ///
    /// Ledger categories missing from the registry contribute nothing to the
    /// typed summaries; registered categories with no transactions appear
    /// with all-zero totals.
    pub fn generate(ledger: &ExpenseLedger, registry: &CategoryRegistry) -> Self {
        let ledger_totals = ledger.get_expenses_by_category_monthly_totals();

        // Every registered category gets an entry, zero-filled when the
        // ledger has no activity for it.
        let mut totals: HashMap<&str, MonthlyTotals> = HashMap::new();
        for record in registry.get_categories() {
            let category_totals = ledger_totals
                .get(&record.category)
                .copied()
                .unwrap_or_default();
            totals.insert(record.category.as_str(), category_totals);
        }

        let mut monthly_balance = MonthlyTotals::new();
        let mut by_type = Vec::with_capacity(CategoryType::ALL.len());

        for category_type in CategoryType::ALL {
            let mut type_summary = TypeSummary {
                category_type,
                categories: Vec::new(),
                monthly_balance: MonthlyTotals::new(),
                year_total: Money::zero(),
            };

            for name in registry.lookup_by_type(category_type) {
                let raw = totals[name];
                let signed = if category_type.sign() >= 0 { raw } else { -raw };

                type_summary.monthly_balance += signed;
                monthly_balance += signed;
                type_summary.categories.push(CategorySummary {
                    name: name.to_string(),
                    totals: raw,
                });
            }

            type_summary.year_total = type_summary.monthly_balance.total();
            by_type.push(type_summary);
        }

        let current_balance = ledger.opening_balance() + monthly_balance.total();

        Self {
            by_type,
            monthly_balance,
            current_balance,
        }
    }

    /// The summary for one category type
    pub fn for_type(&self, category_type: CategoryType) -> &TypeSummary {
        self.by_type
            .iter()
            .find(|summary| summary.category_type == category_type)
            .expect("every category type has a summary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbFile;
    use std::fs;
    use tempfile::TempDir;

    fn load_fixture(expenses: &str, categories: &str) -> (ExpenseLedger, CategoryRegistry) {
        let dir = TempDir::new().unwrap();
        let expenses_db = DbFile::new(dir.path().join("expenses.csv"));
        fs::write(expenses_db.path(), expenses).unwrap();
        let categories_db = DbFile::new(dir.path().join("categories.csv"));
        fs::write(categories_db.path(), categories).unwrap();

        (
            ExpenseLedger::load(expenses_db).unwrap(),
            CategoryRegistry::load(categories_db).unwrap(),
        )
    }

    #[test]
    fn test_worked_example() {
        let (ledger, registry) = load_fixture(
            "2024-01-05 10:00:00,Initial Balance,2024-01-01,500.00,Initial Balance\n\
             2024-02-10 09:00:00,Groceries,2024-02-10,45.50,lunch\n",
            "Groceries,Needs\n",
        );

        let summary = YearSummary::generate(&ledger, &registry);

        let needs = summary.for_type(CategoryType::Needs);
        assert_eq!(needs.categories.len(), 1);
        assert_eq!(needs.categories[0].name, "Groceries");
        assert_eq!(needs.categories[0].totals.month(1), Money::from_cents(4550));

        // February balance is signed negative.
        assert_eq!(summary.monthly_balance.month(1), Money::from_cents(-4550));
        assert_eq!(needs.year_total, Money::from_cents(-4550));
        // 500.00 + (-45.50) = 454.50
        assert_eq!(summary.current_balance, Money::from_cents(45450));
    }

    #[test]
    fn test_income_counts_positive() {
        let (ledger, registry) = load_fixture(
            "2024-01-05 10:00:00,Initial Balance,2024-01-01,100.00,Initial Balance\n\
             2024-01-31 18:00:00,Salary,2024-01-31,2000.00,january pay\n\
             2024-01-15 12:00:00,Groceries,2024-01-15,300.00,food\n",
            "Groceries,Needs\nSalary,Income\n",
        );

        let summary = YearSummary::generate(&ledger, &registry);

        assert_eq!(
            summary.for_type(CategoryType::Income).year_total,
            Money::from_cents(200000)
        );
        assert_eq!(
            summary.for_type(CategoryType::Needs).year_total,
            Money::from_cents(-30000)
        );
        assert_eq!(summary.monthly_balance.month(0), Money::from_cents(170000));
        // 100.00 + 1700.00
        assert_eq!(summary.current_balance, Money::from_cents(180000));
    }

    #[test]
    fn test_registered_category_without_activity_is_zero_filled() {
        let (ledger, registry) = load_fixture(
            "2024-01-05 10:00:00,Initial Balance,2024-01-01,0.00,Initial Balance\n",
            "Groceries,Needs\nCinema,Wants\n",
        );

        let summary = YearSummary::generate(&ledger, &registry);

        let wants = summary.for_type(CategoryType::Wants);
        assert_eq!(wants.categories.len(), 1);
        assert_eq!(wants.categories[0].name, "Cinema");
        assert!(wants.categories[0].totals.is_zero());
        assert!(summary.monthly_balance.is_zero());
        assert_eq!(summary.current_balance, Money::zero());
    }

    #[test]
    fn test_unregistered_ledger_category_is_ignored() {
        let (ledger, registry) = load_fixture(
            "2024-01-05 10:00:00,Initial Balance,2024-01-01,0.00,Initial Balance\n\
             2024-03-01 10:00:00,Mystery,2024-03-05,10.00,untyped\n",
            "Groceries,Needs\n",
        );

        let summary = YearSummary::generate(&ledger, &registry);

        for type_summary in &summary.by_type {
            assert!(type_summary
                .categories
                .iter()
                .all(|c| c.name != "Mystery"));
        }
        assert!(summary.monthly_balance.is_zero());
    }

    #[test]
    fn test_type_balances_sum_to_overall() {
        let (ledger, registry) = load_fixture(
            "2024-01-05 10:00:00,Initial Balance,2024-01-01,50.00,Initial Balance\n\
             2024-01-31 18:00:00,Salary,2024-01-31,1000.00,pay\n\
             2024-02-15 12:00:00,Groceries,2024-02-15,200.00,food\n\
             2024-02-20 12:00:00,Cinema,2024-02-20,30.00,movie\n\
             2024-03-01 08:00:00,Emergency Fund,2024-03-01,150.00,transfer\n",
            "Groceries,Needs\nCinema,Wants\nSalary,Income\nEmergency Fund,Savings\n",
        );

        let summary = YearSummary::generate(&ledger, &registry);

        let mut recombined = MonthlyTotals::new();
        for type_summary in &summary.by_type {
            recombined += type_summary.monthly_balance;
        }
        assert_eq!(recombined, summary.monthly_balance);

        let year_total: Money = summary.by_type.iter().map(|t| t.year_total).sum();
        assert_eq!(year_total, summary.monthly_balance.total());
    }
}

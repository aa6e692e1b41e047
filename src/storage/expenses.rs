//! Household expense repository (expenses.json)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CasaError;
use crate::models::{ExpenseId, HouseholdExpense, PeriodId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<HouseholdExpense>,
}

/// Repository for household expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, HouseholdExpense>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let mut expenses: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<HouseholdExpense>, CasaError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Find an expense by the short ID shown in listings
    pub fn find_by_short_id(&self, short: &str) -> Result<Option<HouseholdExpense>, CasaError> {
        Ok(read_lock(&self.data)?
            .values()
            .find(|e| e.id.matches_short(short))
            .cloned())
    }

    /// Expenses of a period, newest first
    pub fn get_for_period(&self, period_id: PeriodId) -> Result<Vec<HouseholdExpense>, CasaError> {
        let mut expenses: Vec<_> = read_lock(&self.data)?
            .values()
            .filter(|e| e.period_id == period_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    pub fn upsert(&self, expense: HouseholdExpense) -> Result<(), CasaError> {
        write_lock(&self.data)?.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: ExpenseId) -> Result<bool, CasaError> {
        Ok(write_lock(&self.data)?.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_filter_by_period() {
        let (_temp, repo) = create_test_repo();
        let march = PeriodId::new();
        let april = PeriodId::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();

        repo.upsert(HouseholdExpense::new(march, Category::Rent, Money::from_units(900_000), date))
            .unwrap();
        repo.upsert(HouseholdExpense::new(march, Category::Groceries, Money::from_units(90_000), date))
            .unwrap();
        repo.upsert(HouseholdExpense::new(april, Category::Rent, Money::from_units(900_000), date))
            .unwrap();

        assert_eq!(repo.get_for_period(march).unwrap().len(), 2);
        assert_eq!(repo.get_for_period(april).unwrap().len(), 1);
    }

    #[test]
    fn test_short_id_lookup_and_delete() {
        let (_temp, repo) = create_test_repo();
        let expense = HouseholdExpense::new(
            PeriodId::new(),
            Category::Utilities,
            Money::from_units(120_000),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        );
        let id = expense.id;
        repo.upsert(expense).unwrap();

        let found = repo.find_by_short_id(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, id);

        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
        assert!(!repo.delete(id).unwrap());
    }
}

//! Debt repository (debts.json)
//!
//! Holds debts, the payments recorded against them, and each member's monthly
//! payoff budget.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CasaError;
use crate::models::{Debt, DebtId, DebtPayment, Member, Money};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DebtData {
    #[serde(default)]
    debts: Vec<Debt>,
    #[serde(default)]
    payments: Vec<DebtPayment>,
    #[serde(default)]
    monthly_budgets: BTreeMap<Member, Money>,
}

#[derive(Default)]
struct DebtState {
    debts: HashMap<DebtId, Debt>,
    payments: Vec<DebtPayment>,
    monthly_budgets: BTreeMap<Member, Money>,
}

/// Repository for debts, debt payments and payoff budgets
pub struct DebtRepository {
    path: PathBuf,
    state: RwLock<DebtState>,
}

impl DebtRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(DebtState::default()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: DebtData = read_json(&self.path)?;
        let mut state = write_lock(&self.state)?;

        state.debts = file_data.debts.into_iter().map(|d| (d.id, d)).collect();
        state.payments = file_data.payments;
        state.monthly_budgets = file_data.monthly_budgets;

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let state = read_lock(&self.state)?;

        let mut debts: Vec<_> = state.debts.values().cloned().collect();
        debts.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = DebtData {
            debts,
            payments: state.payments.clone(),
            monthly_budgets: state.monthly_budgets.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: DebtId) -> Result<Option<Debt>, CasaError> {
        Ok(read_lock(&self.state)?.debts.get(&id).cloned())
    }

    /// All debts of a member, newest first
    pub fn get_for_member(&self, member: Member) -> Result<Vec<Debt>, CasaError> {
        let mut debts: Vec<_> = read_lock(&self.state)?
            .debts
            .values()
            .filter(|d| d.member == member)
            .cloned()
            .collect();
        debts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(debts)
    }

    /// Find one of a member's debts by short ID or creditor name
    /// (case-insensitive)
    pub fn find(&self, member: Member, query: &str) -> Result<Option<Debt>, CasaError> {
        let state = read_lock(&self.state)?;
        let query_lower = query.trim().to_lowercase();

        let candidates = state.debts.values().filter(|d| d.member == member);
        if let Some(debt) = candidates.clone().find(|d| d.id.matches_short(query)) {
            return Ok(Some(debt.clone()));
        }

        // Prefer an active debt when a creditor name is reused
        let mut by_name: Vec<_> = candidates
            .filter(|d| d.creditor.to_lowercase() == query_lower)
            .collect();
        by_name.sort_by_key(|d| d.is_paid_off);
        Ok(by_name.first().map(|d| (*d).clone()))
    }

    pub fn upsert(&self, debt: Debt) -> Result<(), CasaError> {
        write_lock(&self.state)?.debts.insert(debt.id, debt);
        Ok(())
    }

    /// Delete a debt along with its payment history
    pub fn delete(&self, id: DebtId) -> Result<bool, CasaError> {
        let mut state = write_lock(&self.state)?;
        let removed = state.debts.remove(&id).is_some();
        state.payments.retain(|p| p.debt_id != id);
        Ok(removed)
    }

    pub fn add_payment(&self, payment: DebtPayment) -> Result<(), CasaError> {
        write_lock(&self.state)?.payments.push(payment);
        Ok(())
    }

    /// Most recent payments across a member's debts, newest first
    pub fn recent_payments(
        &self,
        member: Member,
        limit: usize,
    ) -> Result<Vec<(DebtPayment, String)>, CasaError> {
        let state = read_lock(&self.state)?;

        let mut payments: Vec<_> = state
            .payments
            .iter()
            .filter_map(|p| {
                let debt = state.debts.get(&p.debt_id)?;
                (debt.member == member).then(|| (p.clone(), debt.creditor.clone()))
            })
            .collect();
        payments.sort_by(|a, b| b.0.date.cmp(&a.0.date).then(b.0.created_at.cmp(&a.0.created_at)));
        payments.truncate(limit);
        Ok(payments)
    }

    /// Monthly payoff budget; zero when not configured
    pub fn monthly_budget(&self, member: Member) -> Result<Money, CasaError> {
        Ok(read_lock(&self.state)?
            .monthly_budgets
            .get(&member)
            .copied()
            .unwrap_or_default())
    }

    pub fn set_monthly_budget(&self, member: Member, amount: Money) -> Result<(), CasaError> {
        write_lock(&self.state)?.monthly_budgets.insert(member, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebtPriority;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, DebtRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = DebtRepository::new(temp_dir.path().join("debts.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp, repo) = create_test_repo();
        let debt = Debt::new(Member::Duvan, "Banco", Money::from_units(500_000), DebtPriority::Urgent);
        let id = debt.id;
        repo.upsert(debt).unwrap();

        assert_eq!(repo.find(Member::Duvan, "banco").unwrap().unwrap().id, id);
        assert_eq!(repo.find(Member::Duvan, &id.to_string()).unwrap().unwrap().id, id);
        assert!(repo.find(Member::Alex, "banco").unwrap().is_none());
    }

    #[test]
    fn test_budget_defaults_to_zero_and_persists() {
        let (temp, repo) = create_test_repo();
        assert_eq!(repo.monthly_budget(Member::Duvan).unwrap(), Money::zero());

        repo.set_monthly_budget(Member::Duvan, Money::from_units(100_000))
            .unwrap();
        repo.save().unwrap();

        let repo2 = DebtRepository::new(temp.path().join("debts.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.monthly_budget(Member::Duvan).unwrap().units(), 100_000);
    }

    #[test]
    fn test_delete_drops_payments() {
        let (_temp, repo) = create_test_repo();
        let debt = Debt::new(Member::Duvan, "Tío", Money::from_units(50_000), DebtPriority::Normal);
        let id = debt.id;
        repo.upsert(debt).unwrap();
        repo.add_payment(DebtPayment::new(
            id,
            Money::from_units(10_000),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        ))
        .unwrap();
        assert_eq!(repo.recent_payments(Member::Duvan, 10).unwrap().len(), 1);

        assert!(repo.delete(id).unwrap());
        assert!(repo.recent_payments(Member::Duvan, 10).unwrap().is_empty());
    }
}

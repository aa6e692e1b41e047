//! Debt service
//!
//! Personal debts of one member, the payments made against them and the
//! monthly budget the payoff plan works with.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{CasaError, CasaResult};
use crate::models::debt::DebtValidationError;
use crate::models::{Debt, DebtPayment, DebtPriority, Member, Money};
use crate::planner::{self, DebtOverview, PayoffPlanItem};
use crate::storage::Storage;

/// Service for one member's debts
pub struct DebtService<'a> {
    storage: &'a Storage,
    member: Member,
}

impl<'a> DebtService<'a> {
    pub fn new(storage: &'a Storage, member: Member) -> Self {
        Self { storage, member }
    }

    /// Register a new debt
    pub fn add(
        &self,
        creditor: &str,
        amount: Money,
        priority: DebtPriority,
        notes: Option<&str>,
    ) -> CasaResult<Debt> {
        let mut debt = Debt::new(self.member, creditor.trim(), amount, priority);
        if let Some(notes) = notes {
            debt.notes = notes.trim().to_string();
        }

        debt.validate().map_err(map_debt_error)?;

        self.storage.debts.upsert(debt.clone())?;
        self.storage.debts.save()?;

        self.storage.log_create(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.creditor.clone()),
            &debt,
        )?;

        tracing::info!(creditor = %debt.creditor, amount = amount.units(), "added debt");
        Ok(debt)
    }

    /// Find a debt by short ID or creditor name
    pub fn find(&self, query: &str) -> CasaResult<Debt> {
        self.storage
            .debts
            .find(self.member, query)?
            .ok_or_else(|| CasaError::debt_not_found(query))
    }

    /// Record a payment; anything above the remaining balance is ignored
    pub fn pay(&self, query: &str, amount: Money, date: NaiveDate) -> CasaResult<(Debt, DebtPayment)> {
        let before = self.find(query)?;
        let mut debt = before.clone();

        let applied = debt.apply_payment(amount, date).map_err(map_debt_error)?;
        let payment = DebtPayment::new(debt.id, applied, date);

        self.storage.debts.add_payment(payment.clone())?;
        self.storage.debts.upsert(debt.clone())?;
        self.storage.debts.save()?;

        self.storage.log_create(
            EntityType::DebtPayment,
            payment.id.to_string(),
            Some(debt.creditor.clone()),
            &payment,
        )?;
        self.storage.log_update(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.creditor.clone()),
            &before,
            &debt,
            Some(format!(
                "remaining: {} -> {}",
                before.remaining_amount, debt.remaining_amount
            )),
        )?;

        if debt.is_paid_off {
            tracing::info!(creditor = %debt.creditor, "debt paid off");
        }

        Ok((debt, payment))
    }

    pub fn delete(&self, query: &str) -> CasaResult<Debt> {
        let debt = self.find(query)?;

        self.storage.debts.delete(debt.id)?;
        self.storage.debts.save()?;

        self.storage.log_delete(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.creditor.clone()),
            &debt,
        )?;

        Ok(debt)
    }

    /// All debts, newest first
    pub fn list(&self) -> CasaResult<Vec<Debt>> {
        self.storage.debts.get_for_member(self.member)
    }

    /// Recent payments with the creditor they went to
    pub fn recent_payments(&self, limit: usize) -> CasaResult<Vec<(DebtPayment, String)>> {
        self.storage.debts.recent_payments(self.member, limit)
    }

    /// Monthly budget for paying debts; zero when not configured
    pub fn budget(&self) -> CasaResult<Money> {
        self.storage.debts.monthly_budget(self.member)
    }

    pub fn set_budget(&self, amount: Money) -> CasaResult<Money> {
        if amount.is_negative() {
            return Err(CasaError::Validation("Monthly budget cannot be negative".into()));
        }

        let before = self.budget()?;
        self.storage.debts.set_monthly_budget(self.member, amount)?;
        self.storage.debts.save()?;

        self.storage.log_update(
            EntityType::DebtBudget,
            self.member.slug(),
            None,
            &before,
            &amount,
            Some(format!("monthly budget: {} -> {}", before, amount)),
        )?;

        Ok(amount)
    }

    /// Snowball plan for the current budget
    pub fn plan(&self, today: NaiveDate) -> CasaResult<Vec<PayoffPlanItem>> {
        let debts = self.list()?;
        Ok(planner::build_payoff_plan(&debts, self.budget()?, today))
    }

    /// Date the whole balance is gone at the current budget
    pub fn debt_free_date(&self, today: NaiveDate) -> CasaResult<Option<NaiveDate>> {
        let debts = self.list()?;
        Ok(planner::estimate_debt_free_date(&debts, self.budget()?, today))
    }

    pub fn overview(&self) -> CasaResult<DebtOverview> {
        Ok(DebtOverview::from_debts(&self.list()?))
    }
}

fn map_debt_error(e: DebtValidationError) -> CasaError {
    match e {
        DebtValidationError::AlreadyPaidOff(_) => CasaError::Debt(e.to_string()),
        _ => CasaError::Validation(e.to_string()),
    }
}

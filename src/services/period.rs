//! Monthly period service
//!
//! A period is created on first use and seeded with the recurring household
//! expenses and the default support fund goal.

use crate::audit::EntityType;
use crate::config::settings::MonthDefaults;
use crate::error::{CasaError, CasaResult};
use crate::models::{Category, HouseholdExpense, Money, MonthKey, MonthlyPeriod, PeriodStatus};
use crate::storage::Storage;

/// Service for monthly period management
pub struct PeriodService<'a> {
    storage: &'a Storage,
    defaults: &'a MonthDefaults,
}

impl<'a> PeriodService<'a> {
    pub fn new(storage: &'a Storage, defaults: &'a MonthDefaults) -> Self {
        Self { storage, defaults }
    }

    /// Get the period for a month, creating and seeding it if it doesn't exist
    ///
    /// Seeding happens only on creation, so calling this repeatedly is safe.
    pub fn get_or_create(&self, key: MonthKey) -> CasaResult<MonthlyPeriod> {
        if let Some(existing) = self.storage.periods.get_by_key(key)? {
            return Ok(existing);
        }

        let period = MonthlyPeriod::new(key, self.defaults.fund_goal);
        self.storage.periods.upsert(period.clone())?;
        self.storage.periods.save()?;

        self.storage.log_create(
            EntityType::Period,
            period.id.to_string(),
            Some(key.to_string()),
            &period,
        )?;

        let seeds = [
            (Category::Rent, self.defaults.rent, "Arriendo mensual"),
            (Category::Parking, self.defaults.parking, "Garaje mensual"),
        ];

        for (category, amount, description) in seeds {
            if !amount.is_positive() {
                continue;
            }
            let expense = HouseholdExpense::new(period.id, category, amount, key.start_date())
                .with_description(description);
            self.storage.expenses.upsert(expense.clone())?;
            self.storage.log_create(
                EntityType::Expense,
                expense.id.to_string(),
                Some(category.label().to_string()),
                &expense,
            )?;
        }
        self.storage.expenses.save()?;

        tracing::info!(period = %key, "created monthly period");
        Ok(period)
    }

    /// Look up an existing period without creating it
    pub fn get(&self, key: MonthKey) -> CasaResult<MonthlyPeriod> {
        self.storage
            .periods
            .get_by_key(key)?
            .ok_or_else(|| CasaError::period_not_found(key.to_string()))
    }

    /// Mark a period as closed
    pub fn close(&self, key: MonthKey) -> CasaResult<MonthlyPeriod> {
        let before = self.get(key)?;
        if before.is_closed() {
            return Err(CasaError::Validation(format!(
                "{} is already closed",
                key.friendly()
            )));
        }

        let mut period = before.clone();
        period.status = PeriodStatus::Closed;

        self.storage.periods.upsert(period.clone())?;
        self.storage.periods.save()?;

        self.storage.log_update(
            EntityType::Period,
            period.id.to_string(),
            Some(key.to_string()),
            &before,
            &period,
            Some("status: active -> closed".to_string()),
        )?;

        tracing::info!(period = %key, "closed monthly period");
        Ok(period)
    }

    /// Change the support fund goal of a month, creating the month if needed
    pub fn set_fund_goal(&self, key: MonthKey, goal: Money) -> CasaResult<MonthlyPeriod> {
        if goal.is_negative() {
            return Err(CasaError::Validation("Fund goal cannot be negative".into()));
        }

        let before = self.get_or_create(key)?;
        let mut period = before.clone();
        period.fund_goal = goal;

        self.storage.periods.upsert(period.clone())?;
        self.storage.periods.save()?;

        self.storage.log_update(
            EntityType::Period,
            period.id.to_string(),
            Some(key.to_string()),
            &before,
            &period,
            Some(format!("fund_goal: {} -> {}", before.fund_goal, goal)),
        )?;

        Ok(period)
    }

    /// All periods, newest first
    pub fn history(&self) -> CasaResult<Vec<MonthlyPeriod>> {
        self.storage.periods.get_all()
    }
}

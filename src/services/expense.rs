//! Household expense service
//!
//! Records shared spending for a month and works out what each member owes
//! for it.

use chrono::NaiveDate;

use crate::allocation::{compute_share, member_total};
use crate::audit::EntityType;
use crate::config::settings::MonthDefaults;
use crate::error::{CasaError, CasaResult};
use crate::models::{Category, CategoryTotals, HouseholdExpense, Member, Money, MonthKey, MonthlyPeriod};
use crate::storage::Storage;

use super::period::PeriodService;

/// What one member owes and has paid for a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBreakdown {
    pub member: Member,
    /// Share per category with a non-zero amount, in category order
    pub shares: Vec<(Category, Money)>,
    pub total: Money,
    pub paid: Money,
    pub paid_categories: Vec<Category>,
}

impl MemberBreakdown {
    /// Amount still owed (never negative)
    pub fn pending(&self) -> Money {
        let pending = self.total - self.paid;
        if pending.is_negative() {
            Money::zero()
        } else {
            pending
        }
    }

    pub fn is_paid(&self, category: Category) -> bool {
        self.paid_categories.contains(&category)
    }
}

/// The split of a whole month across members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBreakdown {
    pub period: MonthlyPeriod,
    pub totals: CategoryTotals,
    pub members: Vec<MemberBreakdown>,
}

impl PeriodBreakdown {
    /// Sum of household expenses (excludes the support fund goal)
    pub fn total_household(&self) -> Money {
        self.totals.total()
    }

    pub fn member(&self, member: Member) -> Option<&MemberBreakdown> {
        self.members.iter().find(|m| m.member == member)
    }
}

/// Service for household expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    periods: PeriodService<'a>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, defaults: &'a MonthDefaults) -> Self {
        Self {
            storage,
            periods: PeriodService::new(storage, defaults),
        }
    }

    /// Record an expense in the month containing `date`
    pub fn add(
        &self,
        category: Category,
        amount: Money,
        description: Option<&str>,
        date: NaiveDate,
    ) -> CasaResult<HouseholdExpense> {
        let period = self.periods.get_or_create(MonthKey::of(date))?;

        let mut expense = HouseholdExpense::new(period.id, category, amount, date);
        if let Some(description) = description {
            expense = expense.with_description(description);
        }

        expense
            .validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(category.label().to_string()),
            &expense,
        )?;

        tracing::debug!(category = category.slug(), amount = amount.units(), "added expense");
        Ok(expense)
    }

    /// Delete an expense by the short ID shown in listings
    pub fn delete(&self, short_id: &str) -> CasaResult<HouseholdExpense> {
        let expense = self
            .storage
            .expenses
            .find_by_short_id(short_id)?
            .ok_or_else(|| CasaError::expense_not_found(short_id))?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.category.label().to_string()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Expenses recorded for a month, newest first
    pub fn list(&self, key: MonthKey) -> CasaResult<Vec<HouseholdExpense>> {
        let period = self.periods.get_or_create(key)?;
        self.storage.expenses.get_for_period(period.id)
    }

    /// Totals per household category for a month
    pub fn totals(&self, key: MonthKey) -> CasaResult<CategoryTotals> {
        Ok(self
            .list(key)?
            .into_iter()
            .map(|e| (e.category, e.amount))
            .collect())
    }

    /// Per-member shares, totals and payments for a month
    pub fn breakdown(&self, key: MonthKey) -> CasaResult<PeriodBreakdown> {
        let period = self.periods.get_or_create(key)?;
        let totals: CategoryTotals = self
            .storage
            .expenses
            .get_for_period(period.id)?
            .into_iter()
            .map(|e| (e.category, e.amount))
            .collect();
        let payments = self.storage.payments.get_for_period(period.id)?;

        let amount_for = |category: Category| {
            if category == Category::SupportFund {
                period.fund_goal
            } else {
                totals.get(category)
            }
        };

        let members = Member::ALL
            .iter()
            .map(|&member| {
                let shares = Category::ALL
                    .iter()
                    .filter(|c| !amount_for(**c).is_zero())
                    .map(|&c| (c, compute_share(amount_for(c), c, member)))
                    .collect();

                let paid_payments: Vec<_> = payments
                    .iter()
                    .filter(|p| p.member == member && p.paid)
                    .collect();

                MemberBreakdown {
                    member,
                    shares,
                    total: member_total(&totals, period.fund_goal, member),
                    paid: paid_payments.iter().map(|p| p.amount_due).sum(),
                    paid_categories: paid_payments.iter().map(|p| p.category).collect(),
                }
            })
            .collect();

        Ok(PeriodBreakdown {
            period,
            totals,
            members,
        })
    }
}

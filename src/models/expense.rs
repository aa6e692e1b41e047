//! Household expenses and member contributions
//!
//! An expense is an amount spent in one of the household categories during a
//! period. A contribution payment records whether a member has paid their
//! share of a category (including the support fund) for that period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{ExpenseId, PaymentId, PeriodId};
use super::member::Member;
use super::money::Money;

/// An amount spent on a shared household category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdExpense {
    pub id: ExpenseId,
    pub period_id: PeriodId,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Money,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl HouseholdExpense {
    pub fn new(period_id: PeriodId, category: Category, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            period_id,
            category,
            description: None,
            amount,
            date,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.category.is_household() {
            return Err(ExpenseValidationError::NotHouseholdCategory(self.category));
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Whether a member has paid their share of a category for a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member: Member,
    pub period_id: PeriodId,
    pub category: Category,
    pub amount_due: Money,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// A new payment that is already settled on `date`
    pub fn paid(
        member: Member,
        period_id: PeriodId,
        category: Category,
        amount_due: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            member,
            period_id,
            category,
            amount_due,
            paid: true,
            paid_date: Some(date),
            created_at: Utc::now(),
        }
    }

    /// Flip the paid flag, keeping `paid_date` in step
    pub fn toggle(&mut self, date: NaiveDate) {
        self.paid = !self.paid;
        self.paid_date = if self.paid { Some(date) } else { None };
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NotHouseholdCategory(Category),
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotHouseholdCategory(c) => {
                write!(f, "{} is not a household expense category", c)
            }
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_expense_validation() {
        let period = PeriodId::new();
        let ok = HouseholdExpense::new(period, Category::Groceries, Money::from_units(85_000), date());
        assert!(ok.validate().is_ok());

        let fund = HouseholdExpense::new(period, Category::SupportFund, Money::from_units(1), date());
        assert_eq!(
            fund.validate(),
            Err(ExpenseValidationError::NotHouseholdCategory(Category::SupportFund))
        );

        let zero = HouseholdExpense::new(period, Category::Rent, Money::zero(), date());
        assert_eq!(zero.validate(), Err(ExpenseValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let e = HouseholdExpense::new(PeriodId::new(), Category::Rent, Money::from_units(1), date())
            .with_description("   ");
        assert!(e.description.is_none());
    }

    #[test]
    fn test_payment_toggle() {
        let mut p = Payment::paid(
            Member::Alex,
            PeriodId::new(),
            Category::SupportFund,
            Money::from_units(175_000),
            date(),
        );
        assert!(p.paid);

        p.toggle(date());
        assert!(!p.paid);
        assert!(p.paid_date.is_none());

        p.toggle(date());
        assert_eq!(p.paid_date, Some(date()));
    }
}

//! Contribution service
//!
//! Tracks whether each member has paid their share of a category, and the
//! state of the monthly support fund.

use chrono::NaiveDate;

use crate::allocation::compute_share;
use crate::audit::EntityType;
use crate::config::settings::MonthDefaults;
use crate::error::CasaResult;
use crate::models::{Category, Member, Money, MonthKey, MonthlyPeriod, Payment};
use crate::storage::Storage;

use super::period::PeriodService;

/// One member's part of the support fund
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundShare {
    pub member: Member,
    pub share: Money,
    pub paid: bool,
}

/// Support fund progress for a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundStatus {
    pub period: MonthlyPeriod,
    pub goal: Money,
    pub collected: Money,
    pub shares: Vec<FundShare>,
}

impl FundStatus {
    /// What is still missing to reach the goal (never negative)
    pub fn remaining(&self) -> Money {
        let remaining = self.goal - self.collected;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    pub fn is_complete(&self) -> bool {
        self.collected >= self.goal
    }
}

/// Service for member contributions
pub struct ContributionService<'a> {
    storage: &'a Storage,
    periods: PeriodService<'a>,
}

impl<'a> ContributionService<'a> {
    pub fn new(storage: &'a Storage, defaults: &'a MonthDefaults) -> Self {
        Self {
            storage,
            periods: PeriodService::new(storage, defaults),
        }
    }

    /// Flip a member's paid state for a category in a month
    ///
    /// The first toggle creates the payment already paid, with the amount due
    /// fixed at the member's share at that moment.
    pub fn toggle(
        &self,
        member: Member,
        key: MonthKey,
        category: Category,
        today: NaiveDate,
    ) -> CasaResult<Payment> {
        let period = self.periods.get_or_create(key)?;

        if let Some(before) = self.storage.payments.find(member, period.id, category)? {
            let mut payment = before.clone();
            payment.toggle(today);

            self.storage.payments.upsert(payment.clone())?;
            self.storage.payments.save()?;

            self.storage.log_update(
                EntityType::Payment,
                payment.id.to_string(),
                Some(format!("{} {}", member, category.slug())),
                &before,
                &payment,
                Some(format!("paid: {} -> {}", before.paid, payment.paid)),
            )?;

            return Ok(payment);
        }

        let amount = self.category_amount(&period, category)?;
        let payment = Payment::paid(
            member,
            period.id,
            category,
            compute_share(amount, category, member),
            today,
        );

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        self.storage.log_create(
            EntityType::Payment,
            payment.id.to_string(),
            Some(format!("{} {}", member, category.slug())),
            &payment,
        )?;

        tracing::debug!(%member, category = category.slug(), due = payment.amount_due.units(), "recorded payment");
        Ok(payment)
    }

    /// Support fund goal, collected amount and per-member state for a month
    pub fn fund_status(&self, key: MonthKey) -> CasaResult<FundStatus> {
        let period = self.periods.get_or_create(key)?;
        let payments = self.storage.payments.get_for_period(period.id)?;

        let fund_payments: Vec<_> = payments
            .iter()
            .filter(|p| p.category == Category::SupportFund)
            .collect();

        let collected = fund_payments
            .iter()
            .filter(|p| p.paid)
            .map(|p| p.amount_due)
            .sum();

        let shares = Member::ALL
            .iter()
            .map(|&member| FundShare {
                member,
                share: compute_share(period.fund_goal, Category::SupportFund, member),
                paid: fund_payments.iter().any(|p| p.member == member && p.paid),
            })
            .collect();

        Ok(FundStatus {
            goal: period.fund_goal,
            period,
            collected,
            shares,
        })
    }

    /// The amount a category's shares are computed from
    fn category_amount(&self, period: &MonthlyPeriod, category: Category) -> CasaResult<Money> {
        if category == Category::SupportFund {
            return Ok(period.fund_goal);
        }

        Ok(self
            .storage
            .expenses
            .get_for_period(period.id)?
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum())
    }
}

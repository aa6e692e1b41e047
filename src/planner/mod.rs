//! Debt payoff planning
//!
//! Orders a member's active debts (priority tier first, then smallest balance
//! first) and directs the whole monthly budget at the first one, snowball
//! style. Two different payoff estimates come out of here and they answer
//! different questions:
//!
//! - [`build_payoff_plan`] gives each debt a date assuming debts are cleared
//!   strictly one after another;
//! - [`estimate_debt_free_date`] gives a single date for when the total
//!   balance is gone if the budget chips at it as a whole.
//!
//! The last sequential date is never earlier than the aggregate one.
//!
//! Nothing here reads the clock: "today" is always passed in.

mod overview;

pub use overview::DebtOverview;

use chrono::{Months, NaiveDate};

use crate::models::{Debt, Money};

/// Payoff date reported when no plan is possible (no monthly budget)
pub fn no_plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// One debt's place in the payoff plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoffPlanItem {
    pub debt: Debt,
    /// What to pay on this debt this month
    pub suggested_monthly: Money,
    /// When this debt is gone if every earlier debt is paid first;
    /// [`no_plan_date`] when there is no budget
    pub estimated_payoff_date: NaiveDate,
    /// Months this debt alone needs at the full budget; `None` means never
    ///
    /// A projection too far out for the calendar saturates at
    /// `NaiveDate::MAX` while this still holds `Some`, so check this field
    /// (or [`PayoffPlanItem::has_projection`]) rather than the date.
    pub months_to_payoff: Option<u32>,
}

impl PayoffPlanItem {
    /// Whether this item carries a real projection
    pub fn has_projection(&self) -> bool {
        self.months_to_payoff.is_some()
    }
}

/// Active debts in payoff order
///
/// Paid-off debts are dropped. The rest are sorted by priority tier (urgent
/// first), then by remaining balance (smallest first). The sort is stable, so
/// debts equal on both keys keep their input order.
pub fn order_debts_for_payoff(debts: &[Debt]) -> Vec<Debt> {
    let mut active: Vec<Debt> = debts.iter().filter(|d| !d.is_paid_off).cloned().collect();
    active.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(a.remaining_amount.cmp(&b.remaining_amount))
    });
    active
}

/// Snowball payoff plan for this month
///
/// With a positive budget the first debt in payoff order gets the whole budget
/// (never more than it still owes) and every other debt gets nothing this
/// month. Each debt's `months_to_payoff` is how long it would take alone at the
/// full budget; its date adds the months of every debt ahead of it.
///
/// With a zero or negative budget every debt gets a zero suggestion, no month
/// count, and the [`no_plan_date`] sentinel.
pub fn build_payoff_plan(debts: &[Debt], monthly_budget: Money, today: NaiveDate) -> Vec<PayoffPlanItem> {
    let ordered = order_debts_for_payoff(debts);

    if !monthly_budget.is_positive() {
        return ordered
            .into_iter()
            .map(|debt| PayoffPlanItem {
                debt,
                suggested_monthly: Money::zero(),
                estimated_payoff_date: no_plan_date(),
                months_to_payoff: None,
            })
            .collect();
    }

    let mut elapsed_months: u32 = 0;
    ordered
        .into_iter()
        .enumerate()
        .map(|(position, debt)| {
            let months = debt.remaining_amount.periods_to_cover(monthly_budget);
            let suggested_monthly = if position == 0 {
                monthly_budget.min(debt.remaining_amount)
            } else {
                Money::zero()
            };

            elapsed_months = elapsed_months.saturating_add(months);

            PayoffPlanItem {
                debt,
                suggested_monthly,
                estimated_payoff_date: add_months(today, elapsed_months),
                months_to_payoff: Some(months),
            }
        })
        .collect()
}

/// When the total active balance is paid off at the given budget
///
/// Returns `None` when there are no active debts or the budget is zero or
/// negative. The balance is summed in `i128`, and a date past the end of the
/// calendar saturates at `NaiveDate::MAX`.
pub fn estimate_debt_free_date(debts: &[Debt], monthly_budget: Money, today: NaiveDate) -> Option<NaiveDate> {
    if !monthly_budget.is_positive() {
        return None;
    }

    let mut active = debts.iter().filter(|d| !d.is_paid_off).peekable();
    active.peek()?;

    let total_remaining: i128 = active.map(|d| i128::from(d.remaining_amount.units())).sum();
    Some(add_months(today, months_to_cover(total_remaining, monthly_budget)))
}

/// Ceiling of `total / budget`, clamped to `u32`; `budget` must be positive
fn months_to_cover(total: i128, budget: Money) -> u32 {
    if total <= 0 {
        return 0;
    }
    let budget = i128::from(budget.units());
    let months = total / budget + i128::from(total % budget != 0);
    u32::try_from(months).unwrap_or(u32::MAX)
}

/// Calendar-month arithmetic; the day clamps to the end of shorter months and
/// a result past the calendar saturates at `NaiveDate::MAX`
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

//! Totals shown next to the payoff plan

use crate::models::{Debt, DebtPriority, Money};

/// Summary figures across all of a member's debts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtOverview {
    /// Sum of original amounts, settled debts included
    pub total_original: Money,
    /// Sum of remaining amounts over active debts
    pub total_remaining: Money,
    /// Everything paid so far, settled debts included
    pub total_paid: Money,
    pub active_count: usize,
    pub paid_off_count: usize,
    pub urgent_count: usize,
    pub normal_count: usize,
    pub relaxed_count: usize,
}

impl DebtOverview {
    pub fn from_debts(debts: &[Debt]) -> Self {
        let mut overview = Self::default();

        for debt in debts {
            overview.total_original = overview.total_original.saturating_add(debt.original_amount);
            overview.total_paid = overview.total_paid.saturating_add(debt.paid_amount());

            if debt.is_paid_off {
                overview.paid_off_count += 1;
                continue;
            }

            overview.active_count += 1;
            overview.total_remaining = overview.total_remaining.saturating_add(debt.remaining_amount);
            match debt.priority {
                DebtPriority::Urgent => overview.urgent_count += 1,
                DebtPriority::Normal => overview.normal_count += 1,
                DebtPriority::Relaxed => overview.relaxed_count += 1,
            }
        }

        overview
    }

    /// Share of the original total already paid, in whole percent
    pub fn progress_percent(&self) -> u8 {
        if !self.total_original.is_positive() {
            return 0;
        }
        let pct = self.total_paid.mul_div_round(100, self.total_original.units()).units();
        pct.clamp(0, 100) as u8
    }
}

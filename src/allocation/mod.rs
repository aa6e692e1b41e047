//! Proportional cost allocation
//!
//! Given an amount and a category, works out what each contributor owes.
//! Every share is rounded on its own, so the shares of one amount may not add
//! back up to it exactly (100 split three ways is 33 + 33 + 33). Nothing
//! redistributes that remainder.

pub mod rules;

pub use rules::{rule_for, AllocationRule, MemberPercentages};

use crate::models::{Category, CategoryTotals, Member, Money, CONTRIBUTOR_COUNT};

/// The share a member owes for an amount in a category
///
/// # Examples
/// ```
/// use casa_split::allocation::compute_share;
/// use casa_split::models::{Category, Member, Money};
///
/// let rent = Money::from_units(900_000);
/// assert_eq!(compute_share(rent, Category::Rent, Member::Alex), Money::from_units(630_000));
/// assert_eq!(compute_share(rent, Category::Rent, Member::Duvan), Money::from_units(135_000));
/// ```
pub fn compute_share(amount: Money, category: Category, member: Member) -> Money {
    match rule_for(category) {
        AllocationRule::EqualSplit => amount.div_round(CONTRIBUTOR_COUNT),
        AllocationRule::Percentages(percentages) => {
            let percentage = percentages.of(member);
            if percentage == 0 {
                return Money::zero();
            }
            amount.mul_div_round(i64::from(percentage), 100)
        }
    }
}

/// Each contributor's share of one amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberShares {
    pub category: Category,
    pub amount: Money,
    shares: [Money; 3],
}

impl MemberShares {
    pub fn get(&self, member: Member) -> Money {
        self.shares[member_index(member)]
    }

    /// Sum of the rounded shares; may differ from `amount` by rounding
    pub fn total(&self) -> Money {
        self.shares.iter().copied().sum()
    }

    /// `total() - amount`
    pub fn rounding_difference(&self) -> Money {
        self.total() - self.amount
    }

    pub fn iter(&self) -> impl Iterator<Item = (Member, Money)> + '_ {
        Member::ALL.iter().map(move |m| (*m, self.get(*m)))
    }
}

fn member_index(member: Member) -> usize {
    match member {
        Member::Alex => 0,
        Member::Duvan => 1,
        Member::Manuel => 2,
    }
}

/// Split one amount across all contributors
pub fn split(amount: Money, category: Category) -> MemberShares {
    MemberShares {
        category,
        amount,
        shares: Member::ALL.map(|m| compute_share(amount, category, m)),
    }
}

/// What a member owes for a whole period: their share of every household
/// category total plus their share of the support fund goal
pub fn member_total(expenses: &CategoryTotals, fund_goal: Money, member: Member) -> Money {
    let household: Money = Category::HOUSEHOLD
        .iter()
        .map(|c| compute_share(expenses.get(*c), *c, member))
        .sum();
    household + compute_share(fund_goal, Category::SupportFund, member)
}

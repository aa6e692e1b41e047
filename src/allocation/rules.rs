//! The category-to-rule table
//!
//! The table is a `match`, so the compiler checks it covers every category,
//! and `MemberPercentages` has a field per contributor, so every rule names a
//! value for every member.

use crate::models::{Category, Member};

/// Percentage owed by each contributor, in whole percent
///
/// Entries are expected to add up to 100 but nothing enforces it; a zero entry
/// excludes that member from the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPercentages {
    pub alex: u8,
    pub duvan: u8,
    pub manuel: u8,
}

impl MemberPercentages {
    pub const fn new(alex: u8, duvan: u8, manuel: u8) -> Self {
        Self {
            alex,
            duvan,
            manuel,
        }
    }

    /// The percentage for one member
    pub fn of(&self, member: Member) -> u8 {
        match member {
            Member::Alex => self.alex,
            Member::Duvan => self.duvan,
            Member::Manuel => self.manuel,
        }
    }

    pub fn sum(&self) -> u32 {
        u32::from(self.alex) + u32::from(self.duvan) + u32::from(self.manuel)
    }
}

/// How a category's amount is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationRule {
    /// Fixed percentage per member
    Percentages(MemberPercentages),
    /// Divided evenly across all contributors
    EqualSplit,
}

/// Rent: the larger room pays most
const RENT: MemberPercentages = MemberPercentages::new(70, 15, 15);
/// Parking: only the two vehicle owners pay
const PARKING: MemberPercentages = MemberPercentages::new(50, 50, 0);
const SUPPORT_FUND: MemberPercentages = MemberPercentages::new(50, 25, 25);

/// Resolve the rule for a category
pub fn rule_for(category: Category) -> AllocationRule {
    match category {
        Category::Rent => AllocationRule::Percentages(RENT),
        Category::Parking => AllocationRule::Percentages(PARKING),
        Category::Groceries | Category::Utilities => AllocationRule::EqualSplit,
        Category::SupportFund => AllocationRule::Percentages(SUPPORT_FUND),
    }
}

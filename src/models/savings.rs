//! Savings goals for recurring motorcycle costs
//!
//! Each goal sets money aside for something that comes back every few
//! months. A target of 1 or less marks a cost nobody has priced yet: such a
//! goal asks for nothing per month and never counts as complete.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::SavingsGoalId;
use super::member::Member;
use super::money::Money;

/// What a goal saves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Oil,
    OilFilter,
    BrakesFront,
    BrakesRear,
    TireFront,
    TireRear,
    Soat,
    Tecno,
    BrakeFluid,
    Coolant,
    HeavyMaintenance,
    Other,
}

impl GoalCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::OilFilter => "oil_filter",
            Self::BrakesFront => "brakes_front",
            Self::BrakesRear => "brakes_rear",
            Self::TireFront => "tire_front",
            Self::TireRear => "tire_rear",
            Self::Soat => "soat",
            Self::Tecno => "tecno",
            Self::BrakeFluid => "brake_fluid",
            Self::Coolant => "coolant",
            Self::HeavyMaintenance => "heavy_maintenance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for GoalCategory {
    type Err = SavingsGoalValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase().replace('-', "_");
        [
            Self::Oil,
            Self::OilFilter,
            Self::BrakesFront,
            Self::BrakesRear,
            Self::TireFront,
            Self::TireRear,
            Self::Soat,
            Self::Tecno,
            Self::BrakeFluid,
            Self::Coolant,
            Self::HeavyMaintenance,
            Self::Other,
        ]
        .into_iter()
        .find(|c| c.slug() == slug)
        .ok_or(SavingsGoalValidationError::UnknownCategory(slug))
    }
}

/// Goals loaded for a new bike: name, category, known cost (0 when unknown)
/// and months between expenses
pub const DEFAULT_SAVINGS_GOALS: [(&str, GoalCategory, i64, u32); 11] = [
    ("Cambio de aceite (sin filtro)", GoalCategory::Oil, 70_000, 2),
    ("Filtro de aceite", GoalCategory::OilFilter, 0, 4),
    ("Pastillas freno delanteras", GoalCategory::BrakesFront, 35_000, 3),
    ("Bandas freno traseras", GoalCategory::BrakesRear, 0, 6),
    ("Llanta delantera (Michelin Pilot Street)", GoalCategory::TireFront, 290_000, 12),
    ("Llanta trasera (Michelin Pilot Street)", GoalCategory::TireRear, 399_000, 12),
    ("SOAT", GoalCategory::Soat, 343_300, 12),
    ("Tecnomecánica", GoalCategory::Tecno, 248_000, 12),
    ("Líquido de frenos", GoalCategory::BrakeFluid, 0, 12),
    ("Líquido refrigerante", GoalCategory::Coolant, 0, 12),
    ("Mantenimiento fuerte", GoalCategory::HeavyMaintenance, 0, 8),
];

/// Target stored for goals whose cost is not known yet
pub const UNKNOWN_COST_TARGET: Money = Money::from_units(1);

/// Money set aside for one recurring cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: SavingsGoalId,
    pub member: Member,
    pub name: String,
    pub category: GoalCategory,
    pub target_amount: Money,
    #[serde(default)]
    pub saved_amount: Money,
    pub interval_months: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_done_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl SavingsGoal {
    pub fn new(
        member: Member,
        name: impl Into<String>,
        category: GoalCategory,
        target_amount: Money,
        interval_months: u32,
    ) -> Self {
        Self {
            id: SavingsGoalId::new(),
            member,
            name: name.into(),
            category,
            target_amount,
            saved_amount: Money::zero(),
            interval_months,
            is_active: true,
            notes: String::new(),
            last_done_date: None,
            created_at: Utc::now(),
        }
    }

    /// The preloaded goals, unknown costs stored as [`UNKNOWN_COST_TARGET`]
    pub fn defaults(member: Member) -> Vec<Self> {
        DEFAULT_SAVINGS_GOALS
            .iter()
            .map(|&(name, category, cost, interval)| {
                let mut goal = Self::new(member, name, category, UNKNOWN_COST_TARGET, interval);
                if cost > 0 {
                    goal.target_amount = Money::from_units(cost);
                } else {
                    goal.notes = "Cost not set yet".to_string();
                }
                goal
            })
            .collect()
    }

    pub fn is_unknown_cost(&self) -> bool {
        self.target_amount <= UNKNOWN_COST_TARGET
    }

    /// `round(target / interval)`; zero for an unknown cost
    pub fn monthly_needed(&self) -> Money {
        if self.is_unknown_cost() || self.interval_months == 0 {
            return Money::zero();
        }
        self.target_amount.div_round(i64::from(self.interval_months))
    }

    pub fn weekly_needed(&self) -> Money {
        self.monthly_needed().div_round(4)
    }

    pub fn is_complete(&self) -> bool {
        !self.is_unknown_cost() && self.saved_amount >= self.target_amount
    }

    /// Saved share of the target in whole percent, capped at 100
    pub fn progress_percent(&self) -> u8 {
        if self.is_unknown_cost() {
            return 0;
        }
        let pct = self
            .saved_amount
            .mul_div_round(100, self.target_amount.units())
            .units();
        pct.clamp(0, 100) as u8
    }

    /// When the cost comes back, counted from the last time it was paid
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.last_done_date?
            .checked_add_months(Months::new(self.interval_months))
    }

    pub fn validate(&self) -> Result<(), SavingsGoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(SavingsGoalValidationError::EmptyName);
        }
        if self.interval_months == 0 {
            return Err(SavingsGoalValidationError::ZeroInterval);
        }
        if self.target_amount.is_negative() || self.saved_amount.is_negative() {
            return Err(SavingsGoalValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Totals across a member's active goals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavingsTotals {
    pub saved: Money,
    pub target: Money,
    /// Sum of every priced goal's monthly amount
    pub needed_monthly: Money,
}

impl SavingsTotals {
    pub fn from_goals(goals: &[SavingsGoal]) -> Self {
        goals
            .iter()
            .filter(|g| g.is_active)
            .fold(Self::default(), |acc, g| Self {
                saved: acc.saved.saturating_add(g.saved_amount),
                target: acc.target.saturating_add(g.target_amount),
                needed_monthly: acc.needed_monthly.saturating_add(g.monthly_needed()),
            })
    }

    pub fn needed_weekly(&self) -> Money {
        self.needed_monthly.div_round(4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsGoalValidationError {
    EmptyName,
    ZeroInterval,
    NegativeAmount,
    UnknownCategory(String),
}

impl fmt::Display for SavingsGoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Savings goal name cannot be empty"),
            Self::ZeroInterval => write!(f, "Savings goal interval must be at least one month"),
            Self::NegativeAmount => write!(f, "Savings amounts cannot be negative"),
            Self::UnknownCategory(c) => write!(f, "Unknown savings category '{}'", c),
        }
    }
}

impl std::error::Error for SavingsGoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, interval: u32) -> SavingsGoal {
        SavingsGoal::new(Member::Duvan, "Aceite", GoalCategory::Oil, Money::from_units(target), interval)
    }

    #[test]
    fn test_monthly_needed_rounds() {
        assert_eq!(goal(70_000, 2).monthly_needed().units(), 35_000);
        // 290000 / 12 = 24166.67
        assert_eq!(goal(290_000, 12).monthly_needed().units(), 24_167);
        assert_eq!(goal(35_000, 3).weekly_needed().units(), 2_917);
    }

    #[test]
    fn test_unknown_cost() {
        let unknown = goal(1, 4);
        assert!(unknown.is_unknown_cost());
        assert_eq!(unknown.monthly_needed(), Money::zero());
        assert_eq!(unknown.progress_percent(), 0);

        let mut saved = unknown.clone();
        saved.saved_amount = Money::from_units(5_000);
        assert!(!saved.is_complete());

        assert!(goal(0, 4).is_unknown_cost());
        assert!(!goal(2, 4).is_unknown_cost());
    }

    #[test]
    fn test_progress_and_completion() {
        let mut g = goal(70_000, 2);
        g.saved_amount = Money::from_units(35_000);
        assert_eq!(g.progress_percent(), 50);
        assert!(!g.is_complete());

        g.saved_amount = Money::from_units(80_000);
        assert_eq!(g.progress_percent(), 100);
        assert!(g.is_complete());
    }

    #[test]
    fn test_next_due_date() {
        let mut g = goal(70_000, 2);
        assert_eq!(g.next_due_date(), None);
        g.last_done_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        assert_eq!(g.next_due_date(), NaiveDate::from_ymd_opt(2026, 2, 28));
    }

    #[test]
    fn test_defaults() {
        let goals = SavingsGoal::defaults(Member::Duvan);
        assert_eq!(goals.len(), DEFAULT_SAVINGS_GOALS.len());
        assert!(goals.iter().all(|g| g.validate().is_ok()));

        let filter = goals.iter().find(|g| g.category == GoalCategory::OilFilter).unwrap();
        assert_eq!(filter.target_amount, UNKNOWN_COST_TARGET);
        assert!(!filter.notes.is_empty());

        let soat = goals.iter().find(|g| g.category == GoalCategory::Soat).unwrap();
        assert_eq!(soat.target_amount.units(), 343_300);
    }

    #[test]
    fn test_totals_skip_unknown_costs() {
        let mut oil = goal(70_000, 2);
        oil.saved_amount = Money::from_units(10_000);
        let unknown = goal(1, 4);
        let mut retired = goal(120_000, 1);
        retired.is_active = false;

        let totals = SavingsTotals::from_goals(&[oil, unknown, retired]);
        assert_eq!(totals.saved.units(), 10_000);
        assert_eq!(totals.target.units(), 70_001);
        assert_eq!(totals.needed_monthly.units(), 35_000);
        assert_eq!(totals.needed_weekly().units(), 8_750);
    }

    #[test]
    fn test_validate_and_parse() {
        assert!(goal(70_000, 0).validate().is_err());
        assert_eq!("brakes-front".parse::<GoalCategory>().unwrap(), GoalCategory::BrakesFront);
        assert!("engine".parse::<GoalCategory>().is_err());
    }
}

//! Daily work log for a member who earns income on the road

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WorkLogId;
use super::member::Member;
use super::money::Money;

/// Income and costs for one worked day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    pub id: WorkLogId,
    pub member: Member,
    pub date: NaiveDate,
    pub gross_income: Money,
    #[serde(default)]
    pub gas_cost: Money,
    #[serde(default)]
    pub other_costs: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km_driven: Option<u32>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl WorkLog {
    pub fn new(member: Member, date: NaiveDate, gross_income: Money) -> Self {
        Self {
            id: WorkLogId::new(),
            member,
            date,
            gross_income,
            gas_cost: Money::zero(),
            other_costs: Money::zero(),
            km_driven: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Gross income minus gas and other costs
    pub fn net_income(&self) -> Money {
        self.gross_income - self.gas_cost - self.other_costs
    }

    pub fn validate(&self) -> Result<(), WorkLogValidationError> {
        if self.gross_income.is_negative() {
            return Err(WorkLogValidationError::NegativeAmount("gross income"));
        }
        if self.gas_cost.is_negative() {
            return Err(WorkLogValidationError::NegativeAmount("gas cost"));
        }
        if self.other_costs.is_negative() {
            return Err(WorkLogValidationError::NegativeAmount("other costs"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkLogValidationError {
    NegativeAmount(&'static str),
}

impl fmt::Display for WorkLogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(field) => write!(f, "The {} cannot be negative", field),
        }
    }
}

impl std::error::Error for WorkLogValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_income() {
        let mut log = WorkLog::new(
            Member::Duvan,
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            Money::from_units(150_000),
        );
        log.gas_cost = Money::from_units(25_000);
        log.other_costs = Money::from_units(5_000);
        assert_eq!(log.net_income().units(), 120_000);
        assert!(log.validate().is_ok());

        log.gas_cost = Money::from_units(-1);
        assert_eq!(
            log.validate(),
            Err(WorkLogValidationError::NegativeAmount("gas cost"))
        );
    }
}

//! Debt model
//!
//! A debt is one creditor obligation for a single member. The remaining
//! amount only goes down; once it reaches zero the debt is paid off and is
//! excluded from planning for good.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{DebtId, DebtPaymentId};
use super::member::Member;
use super::money::Money;

/// Payoff priority tier; the derived ordering is urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum DebtPriority {
    #[serde(rename = "urgente")]
    Urgent,
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "tranqui")]
    Relaxed,
}

impl DebtPriority {
    pub const ALL: [DebtPriority; 3] = [Self::Urgent, Self::Normal, Self::Relaxed];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Urgent => "urgente",
            Self::Normal => "normal",
            Self::Relaxed => "tranqui",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgente",
            Self::Normal => "Normal",
            Self::Relaxed => "Tranqui",
        }
    }
}

impl fmt::Display for DebtPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DebtPriority {
    type Err = DebtValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgente" | "urgent" => Ok(Self::Urgent),
            "normal" => Ok(Self::Normal),
            "tranqui" | "relaxed" | "low" => Ok(Self::Relaxed),
            other => Err(DebtValidationError::UnknownPriority(other.to_string())),
        }
    }
}

/// One creditor obligation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub member: Member,
    pub creditor: String,
    pub original_amount: Money,
    pub remaining_amount: Money,
    #[serde(default)]
    pub priority: DebtPriority,
    #[serde(default)]
    pub is_paid_off: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_off_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    /// Create a new debt; remaining starts equal to the original amount
    pub fn new(
        member: Member,
        creditor: impl Into<String>,
        amount: Money,
        priority: DebtPriority,
    ) -> Self {
        Self {
            id: DebtId::new(),
            member,
            creditor: creditor.into(),
            original_amount: amount,
            remaining_amount: amount,
            priority,
            is_paid_off: false,
            paid_off_date: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Amount paid so far
    pub fn paid_amount(&self) -> Money {
        self.original_amount - self.remaining_amount
    }

    /// Apply a payment, capped at what is still owed
    ///
    /// Returns the amount actually applied. Reaching zero marks the debt as
    /// paid off on `date`.
    pub fn apply_payment(&mut self, amount: Money, date: NaiveDate) -> Result<Money, DebtValidationError> {
        if self.is_paid_off {
            return Err(DebtValidationError::AlreadyPaidOff(self.creditor.clone()));
        }
        if !amount.is_positive() {
            return Err(DebtValidationError::NonPositiveAmount);
        }

        let applied = amount.min(self.remaining_amount);
        let remaining = self.remaining_amount - applied;
        self.remaining_amount = remaining.max(Money::zero());

        if !remaining.is_positive() {
            self.is_paid_off = true;
            self.paid_off_date = Some(date);
        }

        Ok(applied)
    }

    /// Validate a debt before it is stored
    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.creditor.trim().is_empty() {
            return Err(DebtValidationError::EmptyCreditor);
        }
        if !self.original_amount.is_positive() {
            return Err(DebtValidationError::NonPositiveAmount);
        }
        if self.remaining_amount > self.original_amount {
            return Err(DebtValidationError::RemainingExceedsOriginal);
        }
        Ok(())
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.creditor, self.remaining_amount)
    }
}

/// A recorded payment against a debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayment {
    pub id: DebtPaymentId,
    pub debt_id: DebtId,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl DebtPayment {
    pub fn new(debt_id: DebtId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: DebtPaymentId::new(),
            debt_id,
            amount,
            date,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Validation errors for debts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtValidationError {
    EmptyCreditor,
    NonPositiveAmount,
    RemainingExceedsOriginal,
    AlreadyPaidOff(String),
    UnknownPriority(String),
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCreditor => write!(f, "Creditor name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
            Self::RemainingExceedsOriginal => {
                write!(f, "Remaining amount cannot exceed the original amount")
            }
            Self::AlreadyPaidOff(name) => write!(f, "Debt with {} is already paid off", name),
            Self::UnknownPriority(p) => write!(
                f,
                "Unknown priority '{}' (expected urgente, normal or tranqui)",
                p
            ),
        }
    }
}

impl std::error::Error for DebtValidationError {}

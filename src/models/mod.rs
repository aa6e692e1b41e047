//! Core data models for casa-split
//!
//! Plain data for the household domain: members, categories, money, periods,
//! expenses, debts, work logs, vehicle maintenance and savings goals.

pub mod category;
pub mod debt;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;
pub mod savings;
pub mod vehicle;
pub mod work;

pub use category::{Category, CategoryTotals};
pub use debt::{Debt, DebtPayment, DebtPriority};
pub use expense::{HouseholdExpense, Payment};
pub use ids::{
    DebtId, DebtPaymentId, ExpenseId, MaintenanceId, PaymentId, PeriodId, SavingsGoalId,
    WorkLogId,
};
pub use member::{Beneficiary, Member, CONTRIBUTOR_COUNT};
pub use money::Money;
pub use period::{MonthKey, MonthlyPeriod, PeriodStatus};
pub use savings::{GoalCategory, SavingsGoal, SavingsTotals, DEFAULT_SAVINGS_GOALS};
pub use vehicle::{
    MaintenanceKind, MaintenanceRecord, OdometerReading, VehicleConfig, VehicleDocument,
};
pub use work::WorkLog;

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.
//! Handlers receive "today" from `main`, which is the only place the
//! clock is read.

pub mod debt;
pub mod expense;
pub mod fund;
pub mod period;
pub mod vehicle;
pub mod work;

pub use debt::{handle_debt_command, DebtCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use fund::{handle_fund_command, handle_pay_command, FundCommands};
pub use period::{handle_period_command, PeriodCommands};
pub use vehicle::{handle_vehicle_command, GoalCommands, VehicleCommands};
pub use work::{handle_work_command, WorkCommands};

use chrono::NaiveDate;

use crate::models::{Money, MonthKey};

/// Parse an amount argument such as `900000`, `900.000` or `$900.000`
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}

/// Parse a `YYYY-MM` month argument
pub fn parse_month(s: &str) -> Result<MonthKey, String> {
    MonthKey::parse(s).map_err(|e| e.to_string())
}

/// The month argument, or the month containing `today`
pub(crate) fn month_or_current(month: Option<MonthKey>, today: NaiveDate) -> MonthKey {
    month.unwrap_or_else(|| MonthKey::of(today))
}

//! Period CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{month_or_current, parse_money, parse_month};
use crate::config::settings::Settings;
use crate::display::{format_breakdown, format_period_history};
use crate::error::CasaResult;
use crate::models::{Money, MonthKey};
use crate::services::{ExpenseService, PeriodService};
use crate::storage::Storage;

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show a month (created on first use)
    Show {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// Close a month
    Close {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// Set the support fund goal for a month
    FundGoal {
        /// New goal
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// List all months, newest first
    History,
}

/// Handle a period command
pub fn handle_period_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PeriodCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = PeriodService::new(storage, &settings.month_defaults);

    match cmd {
        PeriodCommands::Show { month } => {
            let key = month_or_current(month, today);
            let breakdown = ExpenseService::new(storage, &settings.month_defaults).breakdown(key)?;
            print!("{}", format_breakdown(&breakdown, settings));
            if breakdown.period.is_closed() {
                println!("\n(closed)");
            }
        }

        PeriodCommands::Close { month } => {
            let key = month_or_current(month, today);
            service.close(key)?;
            println!("Closed {}", key.friendly());
        }

        PeriodCommands::FundGoal { amount, month } => {
            let key = month_or_current(month, today);
            let period = service.set_fund_goal(key, amount)?;
            println!(
                "Fund goal for {} set to {}",
                key.friendly(),
                settings.format_money(period.fund_goal)
            );
        }

        PeriodCommands::History => {
            let periods = service.history()?;
            print!("{}", format_period_history(&periods, settings));
        }
    }

    Ok(())
}

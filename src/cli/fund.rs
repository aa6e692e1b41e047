//! Support fund and payment CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{month_or_current, parse_month};
use crate::config::settings::Settings;
use crate::display::format_fund_status;
use crate::error::CasaResult;
use crate::models::{Category, Member, MonthKey};
use crate::services::ContributionService;
use crate::storage::Storage;

/// Support fund subcommands
#[derive(Subcommand)]
pub enum FundCommands {
    /// Show the support fund for a month
    Status {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// Toggle a member's support fund payment
    Pay {
        /// Member (alex, duvan, manuel)
        member: Member,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },
}

/// Handle a support fund command
pub fn handle_fund_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FundCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    match cmd {
        FundCommands::Status { month } => {
            let service = ContributionService::new(storage, &settings.month_defaults);
            let status = service.fund_status(month_or_current(month, today))?;
            print!("{}", format_fund_status(&status, settings));
        }
        FundCommands::Pay { member, month } => {
            handle_pay_command(storage, settings, member, Category::SupportFund, month, today)?;
        }
    }

    Ok(())
}

/// Toggle a member's paid state for a category
pub fn handle_pay_command(
    storage: &Storage,
    settings: &Settings,
    member: Member,
    category: Category,
    month: Option<MonthKey>,
    today: NaiveDate,
) -> CasaResult<()> {
    let key = month_or_current(month, today);
    let service = ContributionService::new(storage, &settings.month_defaults);
    let payment = service.toggle(member, key, category, today)?;

    if payment.paid {
        println!(
            "{} paid {} {} for {}",
            member,
            category.label(),
            settings.format_money(payment.amount_due),
            key.friendly()
        );
    } else {
        println!(
            "{} {} for {} marked as unpaid",
            member,
            category.label(),
            key.friendly()
        );
    }

    Ok(())
}

//! Work log CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{month_or_current, parse_date, parse_money, parse_month};
use crate::config::settings::Settings;
use crate::display::format_work_summary;
use crate::error::CasaResult;
use crate::models::{Member, Money, MonthKey};
use crate::services::{WorkLogInput, WorkLogUpdate, WorkService};
use crate::storage::Storage;

/// Work subcommands
#[derive(Subcommand)]
pub enum WorkCommands {
    /// Log a worked day
    Log {
        /// Gross income for the day
        #[arg(value_parser = parse_money)]
        gross: Money,
        /// Gas spent
        #[arg(short, long, value_parser = parse_money)]
        gas: Option<Money>,
        /// Other costs
        #[arg(short, long, value_parser = parse_money)]
        other: Option<Money>,
        /// Kilometres driven
        #[arg(short, long)]
        km: Option<u32>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Show the month summary and its logs
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// Change fields of a work log
    Edit {
        /// Work log ID as shown by `summary`
        id: String,
        /// Gross income
        #[arg(long, value_parser = parse_money)]
        gross: Option<Money>,
        /// Gas spent
        #[arg(short, long, value_parser = parse_money)]
        gas: Option<Money>,
        /// Other costs
        #[arg(short, long, value_parser = parse_money)]
        other: Option<Money>,
        /// Kilometres driven
        #[arg(short, long)]
        km: Option<u32>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Delete a work log
    Delete {
        /// Work log ID as shown by `summary`
        id: String,
    },
}

/// Handle a work command
pub fn handle_work_command(
    storage: &Storage,
    settings: &Settings,
    member: Member,
    cmd: WorkCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = WorkService::new(storage, member);

    match cmd {
        WorkCommands::Log {
            gross,
            gas,
            other,
            km,
            notes,
            date,
        } => {
            let input = WorkLogInput {
                gas_cost: gas.unwrap_or_default(),
                other_costs: other.unwrap_or_default(),
                km_driven: km,
                notes,
            };
            let log = service.log(date.unwrap_or(today), gross, input)?;
            println!(
                "Logged {}: net {} ({})",
                log.date,
                settings.format_money(log.net_income()),
                log.id
            );
        }

        WorkCommands::Summary { month } => {
            let key = month_or_current(month, today);
            let logs = service.month_logs(key)?;
            let summary = service.month_summary(key)?;
            print!("{}", format_work_summary(key, &summary, settings));

            if !logs.is_empty() {
                println!();
                for log in &logs {
                    println!(
                        "{:<13}  {}  gross {:>10}  net {:>10}",
                        log.id.to_string(),
                        log.date,
                        settings.format_money(log.gross_income),
                        settings.format_money(log.net_income())
                    );
                }
            }
        }

        WorkCommands::Edit {
            id,
            gross,
            gas,
            other,
            km,
            notes,
            date,
        } => {
            let changes = WorkLogUpdate {
                date,
                gross_income: gross,
                gas_cost: gas,
                other_costs: other,
                km_driven: km,
                notes,
            };
            let log = service.update(&id, changes)?;
            println!(
                "Updated {}: net {} ({})",
                log.date,
                settings.format_money(log.net_income()),
                log.id
            );
        }

        WorkCommands::Delete { id } => {
            let log = service.delete(&id)?;
            println!("Deleted work log for {}", log.date);
        }
    }

    Ok(())
}

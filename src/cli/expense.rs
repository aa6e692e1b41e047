//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{month_or_current, parse_date, parse_money, parse_month};
use crate::config::settings::Settings;
use crate::display::{format_breakdown, format_expense_list};
use crate::error::CasaResult;
use crate::models::{Category, Money, MonthKey};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a household expense
    Add {
        /// Category (arriendo, mercado, servicios, garaje)
        category: Category,
        /// Amount
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List the expenses of a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID as shown by `list`
        id: String,
    },
    /// Show what each member owes for a month
    Breakdown {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = ExpenseService::new(storage, &settings.month_defaults);

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
            date,
        } => {
            let expense = service.add(category, amount, description.as_deref(), date.unwrap_or(today))?;
            println!(
                "Added {} {} on {} ({})",
                expense.category.label(),
                settings.format_money(expense.amount),
                expense.date,
                expense.id
            );
        }

        ExpenseCommands::List { month } => {
            let key = month_or_current(month, today);
            let expenses = service.list(key)?;
            println!("{}", key.friendly());
            print!("{}", format_expense_list(&expenses, settings));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!(
                "Deleted {} {}",
                expense.category.label(),
                settings.format_money(expense.amount)
            );
        }

        ExpenseCommands::Breakdown { month } => {
            let breakdown = service.breakdown(month_or_current(month, today))?;
            print!("{}", format_breakdown(&breakdown, settings));
        }
    }

    Ok(())
}

//! Debt CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_date, parse_money};
use crate::config::settings::Settings;
use crate::display::{format_debt_list, format_debt_overview, format_payoff_plan};
use crate::error::CasaResult;
use crate::models::{DebtPriority, Member, Money};
use crate::services::DebtService;
use crate::storage::Storage;

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Register a new debt
    Add {
        /// Who is owed
        creditor: String,
        /// Amount owed
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Priority (urgente, normal, tranqui)
        #[arg(short, long, default_value = "normal")]
        priority: DebtPriority,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Record a payment on a debt
    Pay {
        /// Creditor name or debt ID
        debt: String,
        /// Amount paid
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List all debts
    List,
    /// Delete a debt and its payments
    Delete {
        /// Creditor name or debt ID
        debt: String,
    },
    /// Show or set the monthly budget for paying debts
    Budget {
        /// New monthly budget
        #[arg(value_parser = parse_money)]
        amount: Option<Money>,
    },
    /// Show the payoff plan
    Plan,
    /// Show recent payments
    Payments {
        /// Number of payments to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    member: Member,
    cmd: DebtCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = DebtService::new(storage, member);

    match cmd {
        DebtCommands::Add {
            creditor,
            amount,
            priority,
            notes,
        } => {
            let debt = service.add(&creditor, amount, priority, notes.as_deref())?;
            println!(
                "Added debt with {}: {} ({})",
                debt.creditor,
                settings.format_money(debt.original_amount),
                debt.id
            );
        }

        DebtCommands::Pay { debt, amount, date } => {
            let (debt, payment) = service.pay(&debt, amount, date.unwrap_or(today))?;
            println!(
                "Paid {} to {}. Remaining: {}",
                settings.format_money(payment.amount),
                debt.creditor,
                settings.format_money(debt.remaining_amount)
            );
            if payment.amount < amount {
                println!(
                    "Only {} was owed; the rest was not applied.",
                    settings.format_money(payment.amount)
                );
            }
            if debt.is_paid_off {
                println!("{} is paid off!", debt.creditor);
            }
        }

        DebtCommands::List => {
            let debts = service.list()?;
            print!("{}", format_debt_list(&debts, settings));
        }

        DebtCommands::Delete { debt } => {
            let debt = service.delete(&debt)?;
            println!("Deleted debt with {}", debt.creditor);
        }

        DebtCommands::Budget { amount } => match amount {
            Some(amount) => {
                service.set_budget(amount)?;
                println!("Monthly debt budget set to {}", settings.format_money(amount));
            }
            None => {
                let budget = service.budget()?;
                if budget.is_positive() {
                    println!("Monthly debt budget: {}", settings.format_money(budget));
                } else {
                    println!("No monthly debt budget set.");
                }
            }
        },

        DebtCommands::Plan => {
            let overview = service.overview()?;
            let budget = service.budget()?;
            let plan = service.plan(today)?;
            let debt_free = service.debt_free_date(today)?;

            print!("{}", format_debt_overview(&overview, budget, settings));
            println!();
            print!("{}", format_payoff_plan(&plan, debt_free, settings));
        }

        DebtCommands::Payments { limit } => {
            let payments = service.recent_payments(limit)?;
            if payments.is_empty() {
                println!("No payments recorded.");
                return Ok(());
            }
            for (payment, creditor) in payments {
                println!(
                    "{}  {:<20}  {:>12}",
                    payment.date,
                    creditor,
                    settings.format_money(payment.amount)
                );
            }
        }
    }

    Ok(())
}

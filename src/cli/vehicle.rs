//! Vehicle CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_date, parse_money};
use crate::config::settings::Settings;
use crate::display::{format_savings_goals, format_vehicle_summary};
use crate::error::CasaResult;
use crate::models::{MaintenanceKind, Member, Money, VehicleConfig};
use crate::services::{SavingsService, ServiceInput, VehicleService};
use crate::storage::Storage;

/// Vehicle subcommands
#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Record a maintenance service
    Service {
        /// Kind (oil, tire_front, tire_rear, brakes, chain, other)
        kind: MaintenanceKind,
        /// Cost
        #[arg(value_parser = parse_money)]
        cost: Money,
        /// Odometer at the service
        #[arg(long)]
        km: Option<u32>,
        /// Odometer at which the next service is due
        #[arg(long)]
        next_km: Option<u32>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Record an odometer reading
    Km {
        /// Current odometer in km
        km: u32,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Show odometer, monthly maintenance cost, alerts and history
    Summary,
    /// Delete a maintenance record
    Delete {
        /// Record ID as shown by `summary`
        id: String,
    },
    /// Show or change the installment and document due dates
    Config {
        /// Monthly financing installment
        #[arg(long, value_parser = parse_money)]
        payment: Option<Money>,
        /// Number of missed installments
        #[arg(long)]
        missed: Option<u32>,
        /// SOAT due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        soat: Option<NaiveDate>,
        /// Tecnomecánica due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        tecno: Option<NaiveDate>,
    },
    /// Savings goals for recurring costs
    #[command(subcommand, alias = "bolsillo")]
    Goal(GoalCommands),
}

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with progress and totals
    List,
    /// Load the default goals for a new bike
    Init,
    /// Put money into a goal
    Save {
        /// Goal ID, category (oil, soat, ...) or name
        goal: String,
        /// Amount saved
        #[arg(value_parser = parse_money)]
        amount: Money,
    },
    /// Set a goal's target cost
    Target {
        /// Goal ID, category or name
        goal: String,
        /// New target
        #[arg(value_parser = parse_money)]
        amount: Money,
    },
    /// Mark the expense as paid: empty the goal and restart its interval
    Reset {
        /// Goal ID, category or name
        goal: String,
    },
}

/// Handle a vehicle command
pub fn handle_vehicle_command(
    storage: &Storage,
    settings: &Settings,
    member: Member,
    cmd: VehicleCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = VehicleService::new(storage, member);

    match cmd {
        VehicleCommands::Service {
            kind,
            cost,
            km,
            next_km,
            description,
            date,
        } => {
            let input = ServiceInput {
                km_at_service: km,
                next_service_km: next_km,
                description,
            };
            let record = service.add_service(date.unwrap_or(today), kind, cost, input)?;
            println!(
                "Recorded {} for {} ({})",
                record.kind,
                settings.format_money(record.cost),
                record.id
            );
        }

        VehicleCommands::Km { km, date } => {
            let reading = service.record_km(date.unwrap_or(today), km)?;
            println!("Odometer at {} km on {}", reading.km, reading.date);
        }

        VehicleCommands::Summary => {
            let summary = service.summary(today)?;
            print!("{}", format_vehicle_summary(&summary, settings));
        }

        VehicleCommands::Delete { id } => {
            let record = service.delete_service(&id)?;
            println!("Deleted {} from {}", record.kind, record.date);
        }

        VehicleCommands::Config {
            payment,
            missed,
            soat,
            tecno,
        } => {
            let current = service.config()?;
            let config = if payment.is_none() && missed.is_none() && soat.is_none() && tecno.is_none() {
                current
            } else {
                service.set_config(VehicleConfig {
                    monthly_payment: payment.unwrap_or(current.monthly_payment),
                    missed_payments: missed.unwrap_or(current.missed_payments),
                    soat_due_date: soat.or(current.soat_due_date),
                    tecno_due_date: tecno.or(current.tecno_due_date),
                })?
            };
            print_config(&config, settings);
        }

        VehicleCommands::Goal(cmd) => handle_goal_command(storage, settings, member, cmd, today)?,
    }

    Ok(())
}

fn print_config(config: &VehicleConfig, settings: &Settings) {
    let date_or_unset = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "not set".into());
    println!("Installment:   {}", settings.format_money(config.monthly_payment));
    println!("Missed:        {}", config.missed_payments);
    println!("SOAT:          {}", date_or_unset(config.soat_due_date));
    println!("Tecnomecánica: {}", date_or_unset(config.tecno_due_date));
}

fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    member: Member,
    cmd: GoalCommands,
    today: NaiveDate,
) -> CasaResult<()> {
    let service = SavingsService::new(storage, member);

    match cmd {
        GoalCommands::List => {
            let goals = service.goals()?;
            let totals = service.totals()?;
            print!("{}", format_savings_goals(&goals, &totals, settings));
        }

        GoalCommands::Init => {
            let goals = service.init_defaults()?;
            println!("Loaded {} savings goals for {}", goals.len(), member);
        }

        GoalCommands::Save { goal, amount } => {
            let goal = service.add_savings(&goal, amount)?;
            println!(
                "{}: saved {} of {}",
                goal.name,
                settings.format_money(goal.saved_amount),
                settings.format_money(goal.target_amount)
            );
        }

        GoalCommands::Target { goal, amount } => {
            let goal = service.set_target(&goal, amount)?;
            println!(
                "{}: target {} ({} / month)",
                goal.name,
                settings.format_money(goal.target_amount),
                settings.format_money(goal.monthly_needed())
            );
        }

        GoalCommands::Reset { goal } => {
            let goal = service.reset(&goal, today)?;
            match goal.next_due_date() {
                Some(due) => println!("{} reset, next due {}", goal.name, due),
                None => println!("{} reset", goal.name),
            }
        }
    }

    Ok(())
}

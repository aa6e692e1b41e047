use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use casa_split::allocation::split;
use casa_split::cli::{
    handle_debt_command, handle_expense_command, handle_fund_command, handle_pay_command,
    handle_period_command, handle_vehicle_command, handle_work_command, parse_money, parse_month,
    DebtCommands, ExpenseCommands, FundCommands, PeriodCommands, VehicleCommands, WorkCommands,
};
use casa_split::config::{paths::CasaPaths, settings::Settings};
use casa_split::models::{Category, Member, Money, MonthKey};
use casa_split::storage::Storage;

#[derive(Parser)]
#[command(
    name = "casa",
    version,
    about = "Household expense splitting and debt payoff planning",
    long_about = "casa-split keeps the shared finances of one household: it splits \
                  rent, groceries, utilities and parking between Alex, Duvan and \
                  Manuel, tracks the monthly support fund for Mamá, and plans how \
                  to pay down personal debts."
)]
struct Cli {
    /// Member whose debts, work and vehicle are used (defaults to the configured one)
    #[arg(long = "for", global = true, env = "CASA_MEMBER", value_name = "MEMBER")]
    for_member: Option<Member>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Show what each member owes for an amount
    Share {
        /// Amount to split
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Category (arriendo, mercado, servicios, garaje, mama_fund)
        category: Category,
        /// Only show this member's share
        member: Option<Member>,
    },

    /// Monthly period commands
    #[command(subcommand)]
    Period(PeriodCommands),

    /// Household expense commands
    #[command(subcommand, alias = "gasto")]
    Expense(ExpenseCommands),

    /// Support fund commands
    #[command(subcommand)]
    Fund(FundCommands),

    /// Toggle a member's payment for a category
    Pay {
        /// Member (alex, duvan, manuel)
        member: Member,
        /// Category (arriendo, mercado, servicios, garaje, mama_fund)
        category: Category,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },

    /// Debt commands
    #[command(subcommand, alias = "deuda")]
    Debt(DebtCommands),

    /// Work income commands
    #[command(subcommand, alias = "trabajo")]
    Work(WorkCommands),

    /// Vehicle maintenance commands
    #[command(subcommand, alias = "moto")]
    Vehicle(VehicleCommands),

    /// Show the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    casa_split::logging::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CasaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let member = cli.for_member.unwrap_or(settings.tracked_member);
    let today = Local::now().date_naive();

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing casa-split at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("New months start with:");
            println!("  Arriendo    {}", settings.format_money(settings.month_defaults.rent));
            println!("  Garaje      {}", settings.format_money(settings.month_defaults.parking));
            println!("  Fondo Mamá  {}", settings.format_money(settings.month_defaults.fund_goal));
            println!();
            println!("Run 'casa period show' to see the current month.");
        }
        Some(Commands::Config) => {
            println!("casa-split Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Tracked member:  {}", settings.tracked_member);
            println!("  Default rent:    {}", settings.format_money(settings.month_defaults.rent));
            println!("  Default parking: {}", settings.format_money(settings.month_defaults.parking));
            println!("  Fund goal:       {}", settings.format_money(settings.month_defaults.fund_goal));
        }
        Some(Commands::Share {
            amount,
            category,
            member,
        }) => {
            let shares = split(amount, category);
            println!("{} {}", category.label(), settings.format_money(amount));
            for (m, share) in shares.iter() {
                if member.map_or(true, |only| only == m) {
                    println!("  {:<8} {:>12}", m.to_string(), settings.format_money(share));
                }
            }
            if member.is_none() && !shares.rounding_difference().is_zero() {
                println!("  (rounding: {})", shares.rounding_difference());
            }
        }
        Some(Commands::Period(cmd)) => handle_period_command(&storage, &settings, cmd, today)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd, today)?,
        Some(Commands::Fund(cmd)) => handle_fund_command(&storage, &settings, cmd, today)?,
        Some(Commands::Pay {
            member,
            category,
            month,
        }) => handle_pay_command(&storage, &settings, member, category, month, today)?,
        Some(Commands::Debt(cmd)) => handle_debt_command(&storage, &settings, member, cmd, today)?,
        Some(Commands::Work(cmd)) => handle_work_command(&storage, &settings, member, cmd, today)?,
        Some(Commands::Vehicle(cmd)) => {
            handle_vehicle_command(&storage, &settings, member, cmd, today)?
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("casa-split - shared household finances");
            println!();
            println!("Run 'casa --help' for usage information.");
        }
    }

    Ok(())
}

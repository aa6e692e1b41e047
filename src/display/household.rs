//! Household expense, breakdown and support fund display

use super::{format_bar, format_header, separator, truncate};
use crate::config::settings::Settings;
use crate::models::{Beneficiary, Category, HouseholdExpense, MonthlyPeriod};
use crate::services::{FundStatus, PeriodBreakdown};

/// Expenses of one month, newest first
pub fn format_expense_list(expenses: &[HouseholdExpense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<10}  {:<24}  {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&separator(76));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<10}  {:<24}  {:>12}\n",
            expense.id.to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category.label(),
            truncate(expense.description.as_deref().unwrap_or(""), 24),
            settings.format_money(expense.amount),
        ));
    }

    let total = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&separator(76));
    output.push('\n');
    output.push_str(&format!("{:<62}  {:>12}\n", "Total", settings.format_money(total)));

    output
}

/// Who owes what for a month
pub fn format_breakdown(breakdown: &PeriodBreakdown, settings: &Settings) -> String {
    let key = breakdown.period.key();
    let mut output = String::new();

    output.push_str(&format_header(&key.friendly(), 60));
    output.push('\n');
    output.push_str(&separator(60));
    output.push('\n');

    for (category, amount) in breakdown.totals.iter() {
        output.push_str(&format!(
            "  {:<12} {:>14}\n",
            category.label(),
            settings.format_money(amount)
        ));
    }
    output.push_str(&format!(
        "  {:<12} {:>14}\n",
        "Total",
        settings.format_money(breakdown.total_household())
    ));
    output.push_str(&format!(
        "  {:<12} {:>14}  (fondo {})\n",
        "Meta fondo",
        settings.format_money(breakdown.period.fund_goal),
        Beneficiary::Mama
    ));
    output.push('\n');

    for member in &breakdown.members {
        output.push_str(&format!(
            "{}  total {}  paid {}  pending {}\n",
            member.member,
            settings.format_money(member.total),
            settings.format_money(member.paid),
            settings.format_money(member.pending()),
        ));

        for (category, share) in &member.shares {
            let mark = if member.is_paid(*category) { "✓" } else { " " };
            output.push_str(&format!(
                "  [{}] {:<12} {:>14}\n",
                mark,
                category.label(),
                settings.format_money(*share)
            ));
        }
    }

    output
}

/// Support fund progress
pub fn format_fund_status(status: &FundStatus, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Fondo {} {}\n",
        Beneficiary::Mama,
        status.period.key().friendly()
    ));
    output.push_str(&format!(
        "{} / {}  {}\n",
        settings.format_money(status.collected),
        settings.format_money(status.goal),
        format_bar(status.collected.units(), status.goal.units(), 20)
    ));

    if status.is_complete() {
        output.push_str("Goal reached\n");
    } else {
        output.push_str(&format!("Missing {}\n", settings.format_money(status.remaining())));
    }
    output.push('\n');

    for share in &status.shares {
        output.push_str(&format!(
            "  [{}] {:<8} {:>12}\n",
            if share.paid { "✓" } else { " " },
            share.member.to_string(),
            settings.format_money(share.share)
        ));
    }

    output
}

/// Period list for the history view
pub fn format_period_history(periods: &[MonthlyPeriod], settings: &Settings) -> String {
    if periods.is_empty() {
        return "No periods yet.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<16}  {:<7}  {:>12}\n",
        "Month", "", "Status", Category::SupportFund.label()
    ));
    output.push_str(&separator(50));
    output.push('\n');

    for period in periods {
        let key = period.key();
        output.push_str(&format!(
            "{:<8}  {:<16}  {:<7}  {:>12}\n",
            key.to_string(),
            key.friendly(),
            period.status.to_string(),
            settings.format_money(period.fund_goal)
        ));
    }

    output
}

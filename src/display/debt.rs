//! Debt and payoff plan display

use chrono::NaiveDate;

use super::{format_bar, separator, truncate};
use crate::config::settings::Settings;
use crate::models::{Debt, Money};
use crate::planner::{DebtOverview, PayoffPlanItem};

/// Table of debts with remaining balance and progress
pub fn format_debt_list(debts: &[Debt], settings: &Settings) -> String {
    if debts.is_empty() {
        return "No debts recorded.".to_string();
    }

    let name_width = debts
        .iter()
        .map(|d| d.creditor.chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<name_width$}  {:<8}  {:>14}  {:>14}  {}\n",
        "ID",
        "Creditor",
        "Priority",
        "Original",
        "Remaining",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width + 72));
    output.push('\n');

    for debt in debts {
        let status = match debt.paid_off_date {
            Some(date) if debt.is_paid_off => format!("Paid {}", date),
            _ if debt.is_paid_off => "Paid".to_string(),
            _ => format_bar(debt.paid_amount().units(), debt.original_amount.units(), 10),
        };

        output.push_str(&format!(
            "{:<13}  {:<name_width$}  {:<8}  {:>14}  {:>14}  {}\n",
            debt.id.to_string(),
            truncate(&debt.creditor, name_width),
            debt.priority.label(),
            settings.format_money(debt.original_amount),
            settings.format_money(debt.remaining_amount),
            status,
            name_width = name_width,
        ));
    }

    output
}

/// Totals block shown above the plan
pub fn format_debt_overview(overview: &DebtOverview, budget: Money, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Remaining:  {}  ({} active, {} paid off)\n",
        settings.format_money(overview.total_remaining),
        overview.active_count,
        overview.paid_off_count
    ));
    output.push_str(&format!(
        "Paid:       {} of {}  {} {}%\n",
        settings.format_money(overview.total_paid),
        settings.format_money(overview.total_original),
        format_bar(i64::from(overview.progress_percent()), 100, 20),
        overview.progress_percent()
    ));
    output.push_str(&format!(
        "Priorities: {} urgent, {} normal, {} relaxed\n",
        overview.urgent_count, overview.normal_count, overview.relaxed_count
    ));

    if budget.is_positive() {
        output.push_str(&format!("Budget:     {} / month\n", settings.format_money(budget)));
    } else {
        output.push_str("Budget:     not set (use 'casa debt budget <amount>')\n");
    }

    output
}

/// The payoff plan, one debt per row in payoff order
pub fn format_payoff_plan(
    plan: &[PayoffPlanItem],
    debt_free: Option<NaiveDate>,
    settings: &Settings,
) -> String {
    if plan.is_empty() {
        return "No active debts. Nothing to plan.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>2}  {:<20}  {:<8}  {:>14}  {:>14}  {:>7}  {}\n",
        "#", "Creditor", "Priority", "Remaining", "Pay now", "Months", "Paid off by"
    ));
    output.push_str(&separator(90));
    output.push('\n');

    for (i, item) in plan.iter().enumerate() {
        let months = item
            .months_to_payoff
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let date = if item.has_projection() {
            item.estimated_payoff_date.format("%Y-%m-%d").to_string()
        } else {
            "no plan".to_string()
        };

        output.push_str(&format!(
            "{:>2}  {:<20}  {:<8}  {:>14}  {:>14}  {:>7}  {}\n",
            i + 1,
            truncate(&item.debt.creditor, 20),
            item.debt.priority.label(),
            settings.format_money(item.debt.remaining_amount),
            settings.format_money(item.suggested_monthly),
            months,
            date,
        ));
    }

    output.push('\n');
    match debt_free {
        Some(date) => output.push_str(&format!("Debt free by {}\n", date.format("%Y-%m-%d"))),
        None => output.push_str("Set a monthly budget to see a debt-free date.\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DebtPriority, Member};
    use crate::planner::build_payoff_plan;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plan_table() {
        let settings = Settings::default();
        let debts = vec![
            Debt::new(Member::Duvan, "Banco", Money::from_units(500_000), DebtPriority::Urgent),
            Debt::new(Member::Duvan, "Tío", Money::from_units(200_000), DebtPriority::Normal),
        ];
        let plan = build_payoff_plan(&debts, Money::from_units(100_000), date(2025, 1, 15));

        let output = format_payoff_plan(&plan, Some(date(2025, 8, 15)), &settings);
        assert!(output.contains("Banco"));
        assert!(output.contains("$100.000"));
        assert!(output.contains("2025-06-15"));
        assert!(output.contains("Debt free by 2025-08-15"));
    }

    #[test]
    fn test_plan_without_budget() {
        let settings = Settings::default();
        let debts = vec![Debt::new(
            Member::Duvan,
            "Banco",
            Money::from_units(500_000),
            DebtPriority::Urgent,
        )];
        let plan = build_payoff_plan(&debts, Money::zero(), date(2025, 1, 15));

        let output = format_payoff_plan(&plan, None, &settings);
        assert!(output.contains("no plan"));
        assert!(output.contains("Set a monthly budget"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_debt_list(&[], &Settings::default()), "No debts recorded.");
    }
}

//! Vehicle, savings goal and work income display

use super::{format_bar, separator, truncate};
use crate::config::settings::Settings;
use crate::models::{MonthKey, SavingsGoal, SavingsTotals};
use crate::services::{VehicleSummary, WorkSummary};

pub fn format_vehicle_summary(summary: &VehicleSummary, settings: &Settings) -> String {
    let mut output = String::new();

    match summary.latest_reading {
        Some(reading) => output.push_str(&format!("Odometer:      {} km ({})\n", reading.km, reading.date)),
        None => output.push_str("Odometer:      no readings yet\n"),
    }
    output.push_str(&format!(
        "Maintenance:   {} / month (last 12 months)\n",
        settings.format_money(summary.monthly_amortization)
    ));
    if summary.config.monthly_payment.is_positive() {
        output.push_str(&format!(
            "Installment:   {} / month",
            settings.format_money(summary.config.monthly_payment)
        ));
        if summary.config.missed_payments > 0 {
            output.push_str(&format!(
                ", {} missed ({} overdue)",
                summary.config.missed_payments,
                settings.format_money(summary.config.overdue_amount())
            ));
        }
        output.push('\n');
    }
    if summary.savings.needed_monthly.is_positive() {
        output.push_str(&format!(
            "Savings:       save {}/month ({}/week)\n",
            settings.format_money(summary.savings.needed_monthly),
            settings.format_money(summary.savings.needed_weekly())
        ));
    }
    for doc in &summary.documents {
        let left = if doc.is_expired() {
            "expired".to_string()
        } else {
            format!("{} days", doc.days_left)
        };
        output.push_str(&format!(
            "{:<15}{} ({})\n",
            format!("{}:", doc.document),
            doc.due_date,
            left
        ));
    }

    if !summary.alerts.is_empty() {
        output.push('\n');
        for alert in &summary.alerts {
            if alert.is_overdue() {
                output.push_str(&format!(
                    "  ! {} overdue by {} km\n",
                    alert.kind,
                    alert.km_left.unsigned_abs()
                ));
            } else {
                output.push_str(&format!("  ~ {} due in {} km\n", alert.kind, alert.km_left));
            }
        }
    }

    if summary.recent_records.is_empty() {
        return output;
    }

    output.push('\n');
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<18}  {:>10}  {:>9}  {:>9}\n",
        "ID", "Date", "Service", "Cost", "Km", "Next km"
    ));
    output.push_str(&separator(78));
    output.push('\n');

    for record in &summary.recent_records {
        let km = record.km_at_service.map(|k| k.to_string()).unwrap_or_default();
        let next = record.next_service_km.map(|k| k.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<18}  {:>10}  {:>9}  {:>9}\n",
            record.id.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.kind.label(),
            settings.format_money(record.cost),
            km,
            next,
        ));
    }

    output
}

/// Goal table with progress bars and the totals line
pub fn format_savings_goals(goals: &[SavingsGoal], totals: &SavingsTotals, settings: &Settings) -> String {
    if goals.is_empty() {
        return "No savings goals. Run `casa vehicle goal init` to load the defaults.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<28}  {:>10}  {:>10}  {:>9}  {}\n",
        "ID", "Goal", "Saved", "Target", "Monthly", "Progress"
    ));
    output.push_str(&separator(96));
    output.push('\n');

    for goal in goals {
        let (target, monthly, progress) = if goal.is_unknown_cost() {
            ("?".to_string(), "-".to_string(), "cost not set".to_string())
        } else {
            (
                settings.format_money(goal.target_amount),
                settings.format_money(goal.monthly_needed()),
                format!(
                    "{} {:>3}%",
                    format_bar(goal.saved_amount.units(), goal.target_amount.units(), 12),
                    goal.progress_percent()
                ),
            )
        };
        output.push_str(&format!(
            "{:<13}  {:<28}  {:>10}  {:>10}  {:>9}  {}\n",
            goal.id.to_string(),
            truncate(&goal.name, 28),
            settings.format_money(goal.saved_amount),
            target,
            monthly,
            progress
        ));
        if let Some(due) = goal.next_due_date() {
            output.push_str(&format!("{:<15}next due {}\n", "", due));
        }
    }

    output.push_str(&separator(96));
    output.push('\n');
    output.push_str(&format!(
        "Saved {} of {}. Save {}/month ({}/week)\n",
        settings.format_money(totals.saved),
        settings.format_money(totals.target),
        settings.format_money(totals.needed_monthly),
        settings.format_money(totals.needed_weekly())
    ));
    output
}

pub fn format_work_summary(key: MonthKey, summary: &WorkSummary, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Trabajo {}\n", key.friendly()));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("Days worked:   {}\n", summary.days_worked));
    output.push_str(&format!("Gross:         {}\n", settings.format_money(summary.total_gross)));
    output.push_str(&format!("Gas:           {}\n", settings.format_money(summary.total_gas)));
    output.push_str(&format!("Other costs:   {}\n", settings.format_money(summary.total_other)));
    output.push_str(&format!("Net:           {}\n", settings.format_money(summary.total_net)));
    output.push_str(&format!(
        "Daily average: {}\n",
        settings.format_money(summary.average_daily_net)
    ));
    if summary.total_km > 0 {
        output.push_str(&format!("Km driven:     {}\n", summary.total_km));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaintenanceKind, Member, Money, VehicleConfig, VehicleDocument};
    use crate::services::{DocumentDue, ServiceAlert};
    use chrono::NaiveDate;

    #[test]
    fn test_alert_lines() {
        let summary = VehicleSummary {
            latest_reading: None,
            monthly_amortization: Money::from_units(37_000),
            alerts: vec![
                ServiceAlert { kind: MaintenanceKind::Oil, km_left: 400 },
                ServiceAlert { kind: MaintenanceKind::Brakes, km_left: -900 },
            ],
            recent_records: Vec::new(),
            config: VehicleConfig::default(),
            documents: Vec::new(),
            savings: SavingsTotals::default(),
        };

        let output = format_vehicle_summary(&summary, &Settings::default());
        assert!(output.contains("$37.000"));
        assert!(output.contains("Cambio de aceite due in 400 km"));
        assert!(output.contains("Frenos overdue by 900 km"));
        assert!(!output.contains("Installment"));
        assert!(!output.contains("Savings"));
    }

    #[test]
    fn test_installment_documents_and_savings() {
        let summary = VehicleSummary {
            latest_reading: None,
            monthly_amortization: Money::zero(),
            alerts: Vec::new(),
            recent_records: Vec::new(),
            config: VehicleConfig {
                monthly_payment: Money::from_units(380_000),
                missed_payments: 2,
                ..Default::default()
            },
            documents: vec![
                DocumentDue {
                    document: VehicleDocument::Soat,
                    due_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                    days_left: 10,
                },
                DocumentDue {
                    document: VehicleDocument::Tecnomecanica,
                    due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    days_left: -20,
                },
            ],
            savings: SavingsTotals {
                saved: Money::zero(),
                target: Money::from_units(70_000),
                needed_monthly: Money::from_units(35_000),
            },
        };

        let output = format_vehicle_summary(&summary, &Settings::default());
        assert!(output.contains("Installment:   $380.000 / month, 2 missed ($760.000 overdue)"));
        assert!(output.contains("save $35.000/month ($8.750/week)"));
        assert!(output.contains("SOAT:          2025-07-01 (10 days)"));
        assert!(output.contains("Tecnomecánica: 2025-06-01 (expired)"));
    }

    #[test]
    fn test_savings_goal_table() {
        let settings = Settings::default();
        assert!(format_savings_goals(&[], &SavingsTotals::default(), &settings).contains("goal init"));

        let goals = SavingsGoal::defaults(Member::Duvan);
        let totals = SavingsTotals::from_goals(&goals);
        let output = format_savings_goals(&goals, &totals, &settings);
        assert!(output.contains("Cambio de aceite (sin filtro)"));
        assert!(output.contains("cost not set"));
        assert!(output.contains("$35.000"));
        assert!(output.contains("Save $153.359/month"));
    }

    #[test]
    fn test_work_summary() {
        let summary = WorkSummary {
            days_worked: 2,
            total_net: Money::from_units(200_000),
            average_daily_net: Money::from_units(100_000),
            ..Default::default()
        };
        let output = format_work_summary(MonthKey::new(2025, 3).unwrap(), &summary, &Settings::default());
        assert!(output.contains("Marzo 2025"));
        assert!(output.contains("Daily average: $100.000"));
        assert!(!output.contains("Km driven"));
    }
}

use casa_split::models::{Debt, DebtPriority, Member, Money};
use casa_split::planner::{build_payoff_plan, estimate_debt_free_date, no_plan_date, order_debts_for_payoff};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn debt(creditor: &str, remaining: i64, priority: DebtPriority) -> Debt {
    Debt::new(Member::Duvan, creditor, Money::from_units(remaining), priority)
}

fn paid_off(creditor: &str, priority: DebtPriority) -> Debt {
    let mut d = debt(creditor, 10_000, priority);
    d.apply_payment(Money::from_units(10_000), date(2025, 1, 1)).unwrap();
    d
}

#[test]
fn urgent_before_normal_regardless_of_balance() {
    let today = date(2025, 1, 10);
    let debts = vec![
        debt("B", 50_000, DebtPriority::Normal),
        debt("A", 200_000, DebtPriority::Urgent),
    ];

    let plan = build_payoff_plan(&debts, Money::from_units(100_000), today);
    assert_eq!(plan.len(), 2);

    assert_eq!(plan[0].debt.creditor, "A");
    assert_eq!(plan[0].months_to_payoff, Some(2));
    assert_eq!(plan[0].suggested_monthly, Money::from_units(100_000));
    assert_eq!(plan[0].estimated_payoff_date, date(2025, 3, 10));

    assert_eq!(plan[1].debt.creditor, "B");
    assert_eq!(plan[1].months_to_payoff, Some(1));
    assert_eq!(plan[1].suggested_monthly, Money::zero());
    assert_eq!(plan[1].estimated_payoff_date, date(2025, 4, 10));
}

#[test]
fn smaller_balance_first_within_a_tier() {
    let debts = vec![
        debt("big", 30_000, DebtPriority::Normal),
        debt("small", 10_000, DebtPriority::Normal),
    ];
    let ordered = order_debts_for_payoff(&debts);
    assert_eq!(ordered[0].creditor, "small");
    assert_eq!(ordered[1].creditor, "big");
}

#[test]
fn ordering_excludes_paid_off_and_is_sorted() {
    let debts = vec![
        debt("r1", 5_000, DebtPriority::Relaxed),
        paid_off("gone", DebtPriority::Urgent),
        debt("n1", 90_000, DebtPriority::Normal),
        debt("u1", 70_000, DebtPriority::Urgent),
        debt("n2", 20_000, DebtPriority::Normal),
        debt("u2", 10_000, DebtPriority::Urgent),
    ];

    let ordered = order_debts_for_payoff(&debts);
    assert_eq!(ordered.len(), 5);
    assert!(ordered.iter().all(|d| !d.is_paid_off));

    for pair in ordered.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority < b.priority
                || (a.priority == b.priority && a.remaining_amount <= b.remaining_amount)
        );
    }

    let names: Vec<_> = ordered.iter().map(|d| d.creditor.as_str()).collect();
    assert_eq!(names, ["u2", "u1", "n2", "n1", "r1"]);
}

#[test]
fn no_budget_means_sentinel_plan() {
    let today = date(2025, 1, 10);
    let debts = vec![
        debt("A", 200_000, DebtPriority::Urgent),
        debt("B", 50_000, DebtPriority::Normal),
        paid_off("C", DebtPriority::Normal),
    ];

    for budget in [0, -100] {
        let plan = build_payoff_plan(&debts, Money::from_units(budget), today);
        assert_eq!(plan.len(), 2);
        for item in &plan {
            assert_eq!(item.suggested_monthly, Money::zero());
            assert_eq!(item.months_to_payoff, None);
            assert_eq!(item.estimated_payoff_date, no_plan_date());
            assert!(!item.has_projection());
        }
        assert_eq!(estimate_debt_free_date(&debts, Money::from_units(budget), today), None);
    }
}

#[test]
fn only_the_focused_debt_gets_money() {
    let today = date(2025, 1, 10);
    let debts = vec![
        debt("A", 40_000, DebtPriority::Urgent),
        debt("B", 50_000, DebtPriority::Urgent),
        debt("C", 60_000, DebtPriority::Relaxed),
    ];

    let plan = build_payoff_plan(&debts, Money::from_units(100_000), today);
    // capped at what A still owes
    assert_eq!(plan[0].suggested_monthly, Money::from_units(40_000));
    assert!(plan[1..].iter().all(|i| i.suggested_monthly.is_zero()));
}

#[test]
fn empty_inputs() {
    let today = date(2025, 1, 10);
    assert!(build_payoff_plan(&[], Money::from_units(100_000), today).is_empty());
    assert_eq!(estimate_debt_free_date(&[], Money::from_units(100_000), today), None);

    let settled = vec![paid_off("C", DebtPriority::Normal)];
    assert!(order_debts_for_payoff(&settled).is_empty());
    assert_eq!(estimate_debt_free_date(&settled, Money::from_units(100_000), today), None);
}

#[test]
fn aggregate_date_is_never_after_sequential_one() {
    let today = date(2025, 1, 31);
    let debts = vec![
        debt("A", 150_000, DebtPriority::Urgent),
        debt("B", 150_000, DebtPriority::Normal),
        debt("C", 10_000, DebtPriority::Relaxed),
    ];
    let budget = Money::from_units(100_000);

    let plan = build_payoff_plan(&debts, budget, today);
    let last = plan.last().unwrap().estimated_payoff_date;
    let aggregate = estimate_debt_free_date(&debts, budget, today).unwrap();

    // sequential: 2 + 2 + 1 = 5 months; aggregate: ceil(310000 / 100000) = 4
    assert_eq!(last, date(2025, 6, 30));
    assert_eq!(aggregate, date(2025, 5, 31));
    assert!(aggregate <= last);
}

#[test]
fn months_roll_over_the_year() {
    let today = date(2025, 11, 15);
    let debts = vec![debt("A", 250_000, DebtPriority::Normal)];
    let plan = build_payoff_plan(&debts, Money::from_units(100_000), today);
    assert_eq!(plan[0].estimated_payoff_date, date(2026, 2, 15));
}

use casa_split::allocation::{compute_share, member_total, split};
use casa_split::models::{Category, CategoryTotals, Member, Money};

fn money(units: i64) -> Money {
    Money::from_units(units)
}

#[test]
fn rent_scenario() {
    let rent = money(900_000);
    assert_eq!(compute_share(rent, Category::Rent, Member::Alex), money(630_000));
    assert_eq!(compute_share(rent, Category::Rent, Member::Duvan), money(135_000));
    assert_eq!(compute_share(rent, Category::Rent, Member::Manuel), money(135_000));
}

#[test]
fn equal_split_uses_fixed_divisor_for_every_member() {
    for units in [0, 1, 2, 5, 50, 100, 101, 333_333, 1_000_001] {
        let amount = money(units);
        let expected = compute_share(amount, Category::Utilities, Member::Alex);
        assert_eq!(expected, amount.div_round(3));
        for member in Member::ALL {
            assert_eq!(compute_share(amount, Category::Utilities, member), expected);
            assert_eq!(compute_share(amount, Category::Groceries, member), expected);
        }
    }
}

#[test]
fn percentage_rule_rounds_half_up() {
    // 15% of 10 = 1.5
    assert_eq!(compute_share(money(10), Category::Rent, Member::Duvan), money(2));
    // 25% of 2 = 0.5
    assert_eq!(compute_share(money(2), Category::SupportFund, Member::Manuel), money(1));
    // 70% of 1 = 0.7
    assert_eq!(compute_share(money(1), Category::Rent, Member::Alex), money(1));
}

#[test]
fn zero_percentage_is_exactly_zero() {
    for units in [0, 1, 99, 180_000, 7_777_777] {
        assert_eq!(
            compute_share(money(units), Category::Parking, Member::Manuel),
            Money::zero()
        );
    }
}

#[test]
fn rounding_remainder_is_not_redistributed() {
    let shares = split(money(100), Category::Groceries);
    assert_eq!(shares.total(), money(99));
    assert_eq!(shares.rounding_difference(), money(-1));

    // 2 split three ways rounds each share up: 1 + 1 + 1
    let shares = split(money(2), Category::Utilities);
    assert_eq!(shares.total(), money(3));

    for units in 0..500 {
        for category in Category::ALL {
            let diff = split(money(units), category).rounding_difference().units();
            assert!(diff.abs() <= 3, "{} {} off by {}", category, units, diff);
        }
    }
}

#[test]
fn member_total_adds_fund_share() {
    let totals: CategoryTotals = [
        (Category::Rent, money(900_000)),
        (Category::Parking, money(180_000)),
        (Category::Groceries, money(90_000)),
    ]
    .into_iter()
    .collect();

    assert_eq!(member_total(&totals, money(350_000), Member::Alex), money(925_000));
    assert_eq!(member_total(&totals, money(350_000), Member::Manuel), money(252_500));
    assert_eq!(member_total(&totals, Money::zero(), Member::Manuel), money(165_000));
}

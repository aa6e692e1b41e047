//! Money type for representing currency amounts
//!
//! Amounts are whole currency units (COP has no subdivision in practice) stored
//! as i64. Every division rounds to the nearest unit at the point it happens
//! instead of carrying fractions around.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use casa_split::models::Money;
    /// let rent = Money::from_units(900_000);
    /// assert_eq!(rent.units(), 900_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by `numerator / denominator`, rounding half away from zero
    ///
    /// # Examples
    /// ```
    /// use casa_split::models::Money;
    /// assert_eq!(Money::from_units(100).mul_div_round(1, 3), Money::from_units(33));
    /// assert_eq!(Money::from_units(5).mul_div_round(1, 2), Money::from_units(3));
    /// ```
    pub fn mul_div_round(&self, numerator: i64, denominator: i64) -> Self {
        Self(div_round_half_away(
            i128::from(self.0) * i128::from(numerator),
            i128::from(denominator),
        ))
    }

    /// Divide rounding half away from zero
    pub fn div_round(&self, divisor: i64) -> Self {
        self.mul_div_round(1, divisor)
    }

    /// How many whole `step`s are needed to cover this amount (ceiling division)
    ///
    /// Zero or negative amounts need zero steps. `step` must be positive.
    pub fn periods_to_cover(&self, step: Money) -> u32 {
        if self.0 <= 0 {
            return 0;
        }
        let steps = self.0 / step.0 + i64::from(self.0 % step.0 != 0);
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    /// Addition clamped at the bounds of `i64`
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "900000", "900.000", "$900.000", "900,000" and "-50000".
    /// A `.` or `,` is only taken as a thousands separator: every group after
    /// it must have exactly three digits, so "12.5" or "1,50" are rejected
    /// rather than read as a different amount.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        let (negative, rest) = match input.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, input),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).trim();

        let separator = rest.chars().find(|c| *c == '.' || *c == ',');
        let groups: Vec<&str> = match separator {
            Some(sep) => rest.split(sep).collect(),
            None => vec![rest],
        };

        let (first, tail) = groups.split_first().ok_or_else(invalid)?;
        let all_digits = |g: &str| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit());

        if !all_digits(*first) {
            return Err(invalid());
        }
        if !tail.is_empty() && (first.len() > 3 || tail.iter().any(|g| g.len() != 3 || !all_digits(*g))) {
            return Err(invalid());
        }

        let digits: String = groups.concat();
        let units: i64 = digits.parse().map_err(|_| invalid())?;

        Ok(Self(if negative { -units } else { units }))
    }

    /// Format with a currency symbol and thousands separator (e.g. "$900.000")
    pub fn format_with(&self, symbol: &str, separator: char) -> String {
        let grouped = group_thousands(self.0.unsigned_abs(), separator);
        if self.is_negative() {
            format!("-{}{}", symbol, grouped)
        } else {
            format!("{}{}", symbol, grouped)
        }
    }

    /// Compact format used on summary lines: "$1.2M", "$180K", or the full
    /// amount below a thousand
    pub fn format_short(&self) -> String {
        let units = self.0;
        if units >= 1_000_000 {
            let tenths = div_round_half_away(i128::from(units), 100_000);
            format!("${}.{}M", tenths / 10, tenths % 10)
        } else if units >= 1_000 {
            format!("${}K", div_round_half_away(i128::from(units), 1_000))
        } else {
            self.to_string()
        }
    }
}

/// Integer division rounding half away from zero
fn div_round_half_away(numerator: i128, denominator: i128) -> i64 {
    let negative = (numerator < 0) != (denominator < 0);
    let n = numerator.abs();
    let d = denominator.abs();
    let q = (2 * n + d) / (2 * d);
    let q = if negative { -q } else { q };
    q as i64
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with("$", '.'))
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(900_000).to_string(), "$900.000");
        assert_eq!(Money::from_units(0).to_string(), "$0");
        assert_eq!(Money::from_units(1_250_000).to_string(), "$1.250.000");
        assert_eq!(Money::from_units(-45_000).to_string(), "-$45.000");
        assert_eq!(Money::from_units(999).to_string(), "$999");
    }

    #[test]
    fn test_format_short() {
        assert_eq!(Money::from_units(1_250_000).format_short(), "$1.3M");
        assert_eq!(Money::from_units(1_000_000).format_short(), "$1.0M");
        assert_eq!(Money::from_units(180_000).format_short(), "$180K");
        assert_eq!(Money::from_units(1_499).format_short(), "$1K");
        assert_eq!(Money::from_units(500).format_short(), "$500");
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(Money::from_units(5).div_round(2).units(), 3);
        assert_eq!(Money::from_units(7).div_round(2).units(), 4);
        assert_eq!(Money::from_units(100).div_round(3).units(), 33);
        assert_eq!(Money::from_units(200).div_round(3).units(), 67);
        assert_eq!(Money::from_units(-5).div_round(2).units(), -3);
    }

    #[test]
    fn test_mul_div_round() {
        assert_eq!(Money::from_units(900_000).mul_div_round(70, 100).units(), 630_000);
        assert_eq!(Money::from_units(33).mul_div_round(15, 100).units(), 5);
        assert_eq!(Money::from_units(10).mul_div_round(15, 100).units(), 2);
    }

    #[test]
    fn test_periods_to_cover() {
        let budget = Money::from_units(100_000);
        assert_eq!(Money::from_units(200_000).periods_to_cover(budget), 2);
        assert_eq!(Money::from_units(200_001).periods_to_cover(budget), 3);
        assert_eq!(Money::from_units(50_000).periods_to_cover(budget), 1);
        assert_eq!(Money::zero().periods_to_cover(budget), 0);
    }

    #[test]
    fn test_periods_to_cover_near_max() {
        let max = Money::from_units(i64::MAX);
        assert_eq!(max.periods_to_cover(Money::from_units(2)), u32::MAX);
        assert_eq!(max.periods_to_cover(max), 1);
        assert_eq!(max.periods_to_cover(Money::from_units(i64::MAX / 4)), 5);
    }

    #[test]
    fn test_saturating_add() {
        let max = Money::from_units(i64::MAX);
        assert_eq!(max.saturating_add(Money::from_units(1)), max);
        assert_eq!(Money::from_units(2).saturating_add(Money::from_units(3)).units(), 5);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("900000").unwrap().units(), 900_000);
        assert_eq!(Money::parse("$900.000").unwrap().units(), 900_000);
        assert_eq!(Money::parse("900,000").unwrap().units(), 900_000);
        assert_eq!(Money::parse("-50000").unwrap().units(), -50_000);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("$").is_err());
    }

    #[test]
    fn test_parse_rejects_decimal_looking_input() {
        assert_eq!(Money::parse("900.000").unwrap().units(), 900_000);
        assert_eq!(Money::parse("1.250.000").unwrap().units(), 1_250_000);
        assert_eq!(Money::parse("-$45.000").unwrap().units(), -45_000);

        for bad in ["12.5", "1.50", "1,5", "1.2345", "1234.567", "1.000,00", "1..000", ".500", "900."] {
            assert_eq!(
                Money::parse(bad),
                Err(MoneyParseError::InvalidFormat(bad.to_string())),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((-a).units(), -1000);
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_units(100), Money::from_units(200)]
            .into_iter()
            .sum();
        assert_eq!(total.units(), 300);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_units(350_000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "350000");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}

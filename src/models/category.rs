//! Allocation categories
//!
//! Four household-expense buckets plus the support fund. Each category maps
//! to exactly one allocation rule (see [`crate::allocation`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// An allocation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "arriendo")]
    Rent,
    #[serde(rename = "mercado")]
    Groceries,
    #[serde(rename = "servicios")]
    Utilities,
    #[serde(rename = "garaje")]
    Parking,
    #[serde(rename = "mama_fund")]
    SupportFund,
}

impl Category {
    /// Household-expense categories, in display order
    pub const HOUSEHOLD: [Category; 4] = [
        Category::Rent,
        Category::Groceries,
        Category::Utilities,
        Category::Parking,
    ];

    /// Every category, household first, fund last
    pub const ALL: [Category; 5] = [
        Category::Rent,
        Category::Groceries,
        Category::Utilities,
        Category::Parking,
        Category::SupportFund,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Rent => "arriendo",
            Self::Groceries => "mercado",
            Self::Utilities => "servicios",
            Self::Parking => "garaje",
            Self::SupportFund => "mama_fund",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Arriendo",
            Self::Groceries => "Mercado",
            Self::Utilities => "Servicios",
            Self::Parking => "Garaje",
            Self::SupportFund => "Fondo Mamá",
        }
    }

    /// Whether this is one of the shared household expenses
    pub fn is_household(&self) -> bool {
        !matches!(self, Self::SupportFund)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the storage slug or the English name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arriendo" | "rent" => Ok(Self::Rent),
            "mercado" | "groceries" => Ok(Self::Groceries),
            "servicios" | "utilities" => Ok(Self::Utilities),
            "garaje" | "parking" => Ok(Self::Parking),
            "mama_fund" | "mama" | "fund" => Ok(Self::SupportFund),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected arriendo, mercado, servicios, garaje or mama_fund)",
            self.0
        )
    }
}

impl std::error::Error for CategoryParseError {}

/// Amount totals per household category for one period
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals(BTreeMap<Category, Money>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category's running total
    pub fn add(&mut self, category: Category, amount: Money) {
        *self.0.entry(category).or_default() += amount;
    }

    /// Total for a category (zero when nothing was recorded)
    pub fn get(&self, category: Category) -> Money {
        self.0.get(&category).copied().unwrap_or_default()
    }

    /// Sum across all categories
    pub fn total(&self) -> Money {
        self.0.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.0.iter().map(|(c, m)| (*c, *m))
    }
}

impl FromIterator<(Category, Money)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (Category, Money)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (category, amount) in iter {
            totals.add(category, amount);
        }
        totals
    }
}

//! User settings for casa-split
//!
//! Display preferences and the default amounts seeded into every new month.

use serde::{Deserialize, Serialize};

use super::paths::CasaPaths;
use crate::error::CasaError;
use crate::models::{Member, Money};

/// Amounts a new month starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDefaults {
    /// Rent expense recorded when a month is created
    #[serde(default = "default_rent")]
    pub rent: Money,

    /// Parking expense recorded when a month is created
    #[serde(default = "default_parking")]
    pub parking: Money,

    /// Support fund goal for a new month
    #[serde(default = "default_fund_goal")]
    pub fund_goal: Money,
}

fn default_rent() -> Money {
    Money::from_units(900_000)
}

fn default_parking() -> Money {
    Money::from_units(180_000)
}

fn default_fund_goal() -> Money {
    Money::from_units(350_000)
}

impl Default for MonthDefaults {
    fn default() -> Self {
        Self {
            rent: default_rent(),
            parking: default_parking(),
            fund_goal: default_fund_goal(),
        }
    }
}

/// User settings for casa-split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Thousands separator used when printing amounts
    #[serde(default = "default_separator")]
    pub thousands_separator: char,

    /// Seed values for new months
    #[serde(default)]
    pub month_defaults: MonthDefaults,

    /// Member whose debts, work and vehicle are tracked by default
    #[serde(default = "default_tracked_member")]
    pub tracked_member: Member,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_separator() -> char {
    '.'
}

fn default_tracked_member() -> Member {
    Member::Duvan
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            thousands_separator: default_separator(),
            month_defaults: MonthDefaults::default(),
            tracked_member: default_tracked_member(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CasaPaths) -> Result<Self, CasaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CasaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| CasaError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Not persisted until `casa init`
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CasaPaths) -> Result<(), CasaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CasaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CasaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured symbol and separator
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.thousands_separator)
    }
}

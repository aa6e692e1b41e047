//! Household member identities
//!
//! The set of contributors is fixed: three siblings who split the household
//! bills. The support fund's recipient is modeled separately as a
//! [`Beneficiary`] so it can never end up on the paying side of a split.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of contributors an equal split divides by
pub const CONTRIBUTOR_COUNT: i64 = 3;

/// A contributing household member
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    Alex,
    Duvan,
    Manuel,
}

impl Member {
    /// All contributors in display order
    pub const ALL: [Member; 3] = [Member::Alex, Member::Duvan, Member::Manuel];

    /// Stable lowercase identifier used in storage and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Alex => "alex",
            Self::Duvan => "duvan",
            Self::Manuel => "manuel",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alex => "Alex",
            Self::Duvan => "Duvan",
            Self::Manuel => "Manuel",
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Member {
    type Err = MemberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alex" => Ok(Self::Alex),
            "duvan" => Ok(Self::Duvan),
            "manuel" => Ok(Self::Manuel),
            _ => Err(MemberParseError(s.to_string())),
        }
    }
}

/// The non-paying recipient of the support fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Beneficiary {
    Mama,
}

impl Beneficiary {
    pub fn slug(&self) -> &'static str {
        "mama"
    }

    pub fn label(&self) -> &'static str {
        "Mamá"
    }
}

impl fmt::Display for Beneficiary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error type for member parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberParseError(pub String);

impl fmt::Display for MemberParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown member '{}' (expected alex, duvan or manuel)",
            self.0
        )
    }
}

impl std::error::Error for MemberParseError {}

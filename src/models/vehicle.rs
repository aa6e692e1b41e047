//! Motorcycle maintenance records, odometer readings and the bike's
//! paperwork (installments, SOAT and tecnomecánica)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::MaintenanceId;
use super::member::Member;
use super::money::Money;

/// Kind of service performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    Oil,
    TireFront,
    TireRear,
    Brakes,
    Chain,
    Other,
}

impl MaintenanceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Oil => "Cambio de aceite",
            Self::TireFront => "Llanta delantera",
            Self::TireRear => "Llanta trasera",
            Self::Brakes => "Frenos",
            Self::Chain => "Kit de arrastre",
            Self::Other => "Otro",
        }
    }

    /// Usual distance between two services of this kind
    pub fn default_interval_km(&self) -> Option<u32> {
        match self {
            Self::Oil => Some(3_000),
            Self::Brakes => Some(8_000),
            Self::Chain => Some(15_000),
            Self::TireFront => Some(20_000),
            Self::TireRear => Some(15_000),
            Self::Other => None,
        }
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MaintenanceKind {
    type Err = MaintenanceValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "oil" | "aceite" => Ok(Self::Oil),
            "tire_front" => Ok(Self::TireFront),
            "tire_rear" => Ok(Self::TireRear),
            "brakes" | "frenos" => Ok(Self::Brakes),
            "chain" => Ok(Self::Chain),
            "other" => Ok(Self::Other),
            other => Err(MaintenanceValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// One service done on the motorcycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub member: Member,
    pub date: NaiveDate,
    pub kind: MaintenanceKind,
    pub cost: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km_at_service: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_service_km: Option<u32>,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn new(member: Member, date: NaiveDate, kind: MaintenanceKind, cost: Money) -> Self {
        Self {
            id: MaintenanceId::new(),
            member,
            date,
            kind,
            cost,
            km_at_service: None,
            next_service_km: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Fill in the next service from the kind's usual interval when only the
    /// service odometer is known
    pub fn apply_default_interval(&mut self) {
        if self.next_service_km.is_some() {
            return;
        }
        if let (Some(at), Some(interval)) = (self.km_at_service, self.kind.default_interval_km()) {
            if at > 0 {
                self.next_service_km = Some(at.saturating_add(interval));
            }
        }
    }

    pub fn validate(&self) -> Result<(), MaintenanceValidationError> {
        if self.cost.is_negative() {
            return Err(MaintenanceValidationError::NegativeCost);
        }
        if let (Some(at), Some(next)) = (self.km_at_service, self.next_service_km) {
            if next <= at {
                return Err(MaintenanceValidationError::NextServiceNotAhead { at, next });
            }
        }
        Ok(())
    }
}

/// An odometer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdometerReading {
    pub member: Member,
    pub date: NaiveDate,
    pub km: u32,
}

/// Financing and legal paperwork of the bike
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleConfig {
    #[serde(default)]
    pub monthly_payment: Money,
    #[serde(default)]
    pub missed_payments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soat_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tecno_due_date: Option<NaiveDate>,
}

impl VehicleConfig {
    /// What the missed installments add up to
    pub fn overdue_amount(&self) -> Money {
        Money::from_units(
            self.monthly_payment
                .units()
                .saturating_mul(i64::from(self.missed_payments)),
        )
    }

    pub fn validate(&self) -> Result<(), MaintenanceValidationError> {
        if self.monthly_payment.is_negative() {
            return Err(MaintenanceValidationError::NegativeInstallment);
        }
        Ok(())
    }
}

/// Documents with a legal due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleDocument {
    Soat,
    Tecnomecanica,
}

impl VehicleDocument {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Soat => "SOAT",
            Self::Tecnomecanica => "Tecnomecánica",
        }
    }
}

impl fmt::Display for VehicleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceValidationError {
    NegativeCost,
    NegativeInstallment,
    NextServiceNotAhead { at: u32, next: u32 },
    UnknownKind(String),
}

impl fmt::Display for MaintenanceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCost => write!(f, "Maintenance cost cannot be negative"),
            Self::NegativeInstallment => write!(f, "Monthly installment cannot be negative"),
            Self::NextServiceNotAhead { at, next } => write!(
                f,
                "Next service at {} km must be after the service odometer of {} km",
                next, at
            ),
            Self::UnknownKind(k) => write!(
                f,
                "Unknown maintenance type '{}' (expected oil, tire_front, tire_rear, brakes, chain or other)",
                k
            ),
        }
    }
}

impl std::error::Error for MaintenanceValidationError {}
